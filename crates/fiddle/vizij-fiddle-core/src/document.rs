//! Immutable document text shared between the snippet store, the live editor
//! state and the compile pipeline.

use std::fmt;
use std::sync::Arc;

/// An immutable, cheaply cloneable text value.
///
/// Stands in for the editor framework's document type: every keystroke
/// produces a fresh value, and the widget compares documents by content to
/// decide whether the reader has unsaved edits. Comparison takes a
/// pointer-equality fast path, so clones of the same document compare in O(1).
#[derive(Clone, Debug)]
pub struct DocText(Arc<str>);

impl DocText {
    /// Create a document from any text.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    /// The empty document.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Get the document contents.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document contains no text at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of lines, counting the empty document as one line.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.0.lines().count().max(1)
    }
}

impl PartialEq for DocText {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for DocText {}

impl Default for DocText {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for DocText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for DocText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for DocText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
