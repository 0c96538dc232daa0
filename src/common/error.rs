//! # Client Errors
//!
//! Every way a single classification call can fail. A service-level error
//! payload (for example "model is currently loading") is not listed here: it
//! arrives as a normal JSON body and is surfaced as
//! [`ClassifyResponse::RemoteError`](super::prediction::ClassifyResponse::RemoteError).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// No bearer token was supplied.
    #[error("credential is empty")]
    MissingCredential,

    /// The endpoint is not an absolute http(s) URL.
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The image path does not resolve. Raised before any request is sent.
    #[error("image file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The image exists but could not be read.
    #[error("failed to read image file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request could not be completed (DNS, refused connection, timeout,
    /// truncated body).
    #[error("request to inference endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body is not valid UTF-8 JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClassifyError {
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => ClassifyError::FileNotFound { path },
            _ => ClassifyError::FileRead { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_maps_to_file_not_found() {
        let err = ClassifyError::from_io(
            PathBuf::from("missing.jpeg"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ClassifyError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "image file not found: missing.jpeg");
    }

    #[test]
    fn test_other_io_errors_map_to_file_read() {
        let err = ClassifyError::from_io(
            PathBuf::from("locked.jpeg"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ClassifyError::FileRead { .. }));
    }
}
