//! Error types for the fiddle widget.
//!
//! Compile failures are deliberately *not* here: they are the
//! [`TransformError`](crate::transform::TransformError) value the widget holds
//! as visible state. `FiddleError` covers caller mistakes and plumbing.

use serde::{Deserialize, Serialize};

/// Errors a widget host can act on.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FiddleError {
    /// Snippet selection out of range
    #[error("Snippet index {index} out of range (have {count})")]
    SnippetOutOfRange { index: usize, count: usize },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl FiddleError {
    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::SnippetOutOfRange { .. } => "selection",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for FiddleError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
