//! # Common Components
//!
//! Data types and plumbing shared by the client and the binary.
//!
//! ## Modules
//!
//! - [`prediction`]: Response payloads returned by the inference service
//! - [`error`]: Failure taxonomy for a classification call
//! - [`config`]: Layered configuration (file, environment, flags)
//! - [`logging`]: Logger initialization

pub mod config;
pub mod error;
pub mod logging;
pub mod prediction;
