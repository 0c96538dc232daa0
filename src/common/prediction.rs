//! # Prediction Payloads
//!
//! Shapes returned by the hosted inference service. The service answers with
//! a JSON array of `{score, label}` objects ordered by descending score:
//!
//! ```json
//! [{"score": 0.937, "label": "Egyptian cat"}, {"score": 0.038, "label": "tabby, tabby cat"}]
//! ```
//!
//! or, when something is wrong on its side, with an error object:
//!
//! ```json
//! {"error": "Model google/vit-base-patch16-224 is currently loading", "estimated_time": 20.0}
//! ```
//!
//! Both decode into [`ClassifyResponse`]. Nothing is re-sorted or range
//! checked; callers inspect the variant before trusting the result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single ranked guess from the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Confidence in the range 0.0 to 1.0, as reported by the service
    pub score: f64,
    /// Category name (ImageNet labels may contain several comma separated synonyms)
    pub label: String,
}

/// Decoded response body, passed through without validation.
///
/// Variants are tried in declaration order, so a body only lands in
/// [`Other`](ClassifyResponse::Other) when it is valid JSON matching neither
/// known shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassifyResponse {
    /// Ranked predictions, in the order the service sent them
    Predictions(Vec<Prediction>),

    /// Service-level error, e.g. the model is still loading
    RemoteError {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estimated_time: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        warnings: Option<Vec<String>>,
    },

    /// Any other valid JSON
    Other(serde_json::Value),
}

impl ClassifyResponse {
    /// Returns the predictions if the service answered with a ranked list.
    pub fn predictions(&self) -> Option<&[Prediction]> {
        match self {
            ClassifyResponse::Predictions(predictions) => Some(predictions.as_slice()),
            _ => None,
        }
    }

    pub fn is_remote_error(&self) -> bool {
        matches!(self, ClassifyResponse::RemoteError { .. })
    }

    /// Re-encodes the payload as pretty JSON, in the shape it was received.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ClassifyResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyResponse::Predictions(predictions) if predictions.is_empty() => {
                write!(f, "(no predictions)")
            }
            ClassifyResponse::Predictions(predictions) => {
                for (rank, prediction) in predictions.iter().enumerate() {
                    if rank > 0 {
                        writeln!(f)?;
                    }
                    write!(
                        f,
                        "{:>2}. {:<40} {:.4}",
                        rank + 1,
                        prediction.label,
                        prediction.score
                    )?;
                }
                Ok(())
            }
            ClassifyResponse::RemoteError {
                error,
                estimated_time,
                warnings,
            } => {
                write!(f, "remote service error: {}", error)?;
                if let Some(secs) = estimated_time {
                    write!(f, " (estimated time: {:.1}s)", secs)?;
                }
                for warning in warnings.iter().flatten() {
                    write!(f, "\nwarning: {}", warning)?;
                }
                Ok(())
            }
            ClassifyResponse::Other(value) => write!(f, "{}", value),
        }
    }
}
