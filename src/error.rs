//! Error taxonomy for the retrieval pipeline.
//!
//! Every failure here is terminal for the operation that produced it: nothing
//! is retried, no fallback chunk is substituted, and the error reaches the
//! caller unmodified. Failure is scoped to the single load or query; a later,
//! independent operation on the same process may still succeed.

use std::path::PathBuf;

use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Failures surfaced by document loading, corpus construction, and retrieval.
#[derive(Debug, Error)]
pub enum RagError {
    /// The document path does not exist.
    #[error("document not found: {path}")]
    NotFound {
        /// Path the caller asked to load.
        path: PathBuf,
    },

    /// Caller-supplied data was malformed: undecodable bytes, a query vector
    /// of the wrong dimension, or mismatched chunk/embedding counts.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was malformed.
        reason: String,
    },

    /// Retrieval was attempted against a corpus holding zero chunks.
    #[error("corpus contains no chunks; nothing to retrieve")]
    EmptyCorpus,

    /// A zero-norm vector made cosine similarity undefined.
    #[error("degenerate zero-norm embedding for {context}")]
    DegenerateEmbedding {
        /// Which vector was degenerate (the query, or a chunk by index).
        context: String,
    },

    /// The embedding collaborator failed; see [`EmbeddingError`].
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    /// Filesystem failure other than a missing path or undecodable bytes.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path being read when the failure occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl RagError {
    /// Build an [`RagError::InvalidInput`] from anything string-like.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True when the error is a missing document path.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the error reports malformed caller input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// True when retrieval ran against zero chunks.
    #[must_use]
    pub fn is_empty_corpus(&self) -> bool {
        matches!(self, Self::EmptyCorpus)
    }

    /// True when a zero-norm vector was rejected.
    #[must_use]
    pub fn is_degenerate_embedding(&self) -> bool {
        matches!(self, Self::DegenerateEmbedding { .. })
    }
}
