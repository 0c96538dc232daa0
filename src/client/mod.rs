//! # Client Components
//!
//! ## Inference Client ([`client`])
//! Reads an image, posts it to the hosted model with the bearer token and
//! decodes the ranked predictions. One request per call, no retries.

pub mod client;

// Re-export for convenience
pub use client::{classify, InferenceClient};
