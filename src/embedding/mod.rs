//! Embedding providers: the collaborator that turns text into vectors.
//!
//! This module defines the [`EmbeddingProvider`] trait that retrieval consumes
//! without knowing how vectors are produced, plus three implementations:
//!
//! ```text
//!                  ┌──────────────────────┐
//!                  │  EmbeddingProvider   │
//!                  │  (async, batched)    │
//!                  └──────────┬───────────┘
//!                             │
//!          ┌──────────────────┼──────────────────┐
//!          ▼                  ▼                  ▼
//!   ┌─────────────┐   ┌──────────────┐   ┌──────────────┐
//!   │    Mock     │   │    Remote    │   │   Caching    │
//!   │ hash-based  │   │ HTTP, OpenAI │   │  decorator   │
//!   │ (tests/dev) │   │  wire shape  │   │ (wraps both) │
//!   └─────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! Providers are deterministic for the pipeline's purposes: the same input
//! text yields the same vector within a run, which is what makes retrieval
//! reproducible.

pub mod cache;
pub mod mock;
pub mod remote;

use async_trait::async_trait;
use thiserror::Error;

pub use cache::{CacheStats, CachingEmbeddingProvider};
pub use mock::MockEmbeddingProvider;
pub use remote::{RemoteEmbeddingConfig, RemoteEmbeddingProvider};

/// Failures raised by embedding providers.
///
/// These are terminal for the request that hit them; callers surface them
/// rather than retrying or falling back to another provider.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("embedding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("embedding API returned {status}: {message}")]
    Api {
        /// HTTP status code from the response.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// The provider returned a different number of vectors than texts sent.
    #[error("embedding batch shape mismatch: sent {expected} texts, got {got} vectors")]
    BatchShape {
        /// Number of texts in the request.
        expected: usize,
        /// Number of vectors in the response.
        got: usize,
    },

    /// A returned vector does not match the provider's declared dimension.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    Dimension {
        /// Dimension the provider advertises.
        expected: usize,
        /// Dimension actually returned.
        got: usize,
    },

    /// The configured endpoint could not be parsed into a URL.
    #[error("invalid embedding endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Provider configuration is incomplete or malformed.
    #[error("embedding configuration error: {reason}")]
    Config {
        /// What is wrong with the configuration.
        reason: String,
    },
}

/// Turns batches of text into fixed-dimension vectors.
///
/// The pipeline calls `embed` once per document build (all chunks in one
/// batch) and once per query. Implementations must return exactly one vector
/// per input text, in input order, each of [`dimension`](Self::dimension)
/// components.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Dimensionality of every vector this provider returns.
    fn dimension(&self) -> usize;

    /// Embed each text in `texts`, preserving order.
    ///
    /// An empty batch yields an empty result without side effects.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}
