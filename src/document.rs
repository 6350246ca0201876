//! Document loading.
//!
//! A [`Document`] is the immutable text blob the rest of the pipeline derives
//! from. Loading reads the whole file in one pass and releases the handle on
//! every exit path; there is no partial read, no reload, and no mutation after
//! construction.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RagError;

/// An immutable UTF-8 text blob, the unit the chunker consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: Option<PathBuf>,
    text: String,
}

impl Document {
    /// Load a document from a plain-text UTF-8 file.
    ///
    /// Leading and trailing whitespace is trimmed, so a file holding only a
    /// newline loads as an empty document.
    ///
    /// # Errors
    ///
    /// - [`RagError::NotFound`] when `path` does not exist.
    /// - [`RagError::InvalidInput`] when the bytes are not valid UTF-8.
    /// - [`RagError::Io`] for any other filesystem failure.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RagError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RagError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                RagError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let text = String::from_utf8(bytes).map_err(|_| RagError::InvalidInput {
            reason: format!("{} is not valid UTF-8", path.display()),
        })?;
        let text = text.trim().to_string();
        debug!(
            path = %path.display(),
            chars = text.chars().count(),
            "loaded document"
        );
        Ok(Self {
            source: Some(path.to_path_buf()),
            text,
        })
    }

    /// Wrap an in-memory string as a document, verbatim (no trimming).
    ///
    /// For callers that already hold the text: tests, demos, services that
    /// receive documents over some other channel.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: None,
            text: text.into(),
        }
    }

    /// The document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The path this document was loaded from, when it came from disk.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of Unicode scalar values in the text.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the document holds no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
