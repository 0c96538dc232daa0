pub mod client;
pub mod common;

pub use client::{classify, InferenceClient};
pub use common::error::ClassifyError;
pub use common::prediction::{ClassifyResponse, Prediction};
