//! Compile contract between the widget and the external code transformer.
//!
//! The widget never interprets documents itself; it hands the text to a
//! [`Transform`] collaborator and reacts to the outcome. On the web the
//! collaborator is the documentation site's bundler hook; in tests it is a
//! closure.

use serde::{Deserialize, Serialize};

/// Structured outcome of a failed compile. The message is shown to the
/// reader verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct TransformError {
    pub message: String,
}

impl TransformError {
    /// Create a new transform error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Converts editor text into a form the playback engine can render.
///
/// `Ok(())` accepts the document as the new preview content. The error case
/// is a value, never a panic: a broken snippet must not take the page down.
pub trait Transform {
    fn transform(&mut self, source: &str) -> Result<(), TransformError>;
}

impl<F> Transform for F
where
    F: FnMut(&str) -> Result<(), TransformError>,
{
    fn transform(&mut self, source: &str) -> Result<(), TransformError> {
        self(source)
    }
}

/// Transform that accepts every document. Useful for static previews that
/// ship without a compiler.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl Transform for AcceptAll {
    fn transform(&mut self, _source: &str) -> Result<(), TransformError> {
        Ok(())
    }
}
