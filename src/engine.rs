//! End-to-end retrieval engine: document in, grounded answers out.
//!
//! [`RagEngine`] wires the whole pipeline together behind one handle. Build
//! it once from a document (file or string) and an embedding provider; every
//! question then runs embed, nearest-chunk lookup, and answer formatting
//! against the corpus captured at build time.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::answer::format_answer;
use crate::chunking::{Chunk, DEFAULT_MAX_CHARS};
use crate::document::Document;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::error::RagError;
use crate::retrieval::{Corpus, corpus_from_document};

/// Configures and constructs a [`RagEngine`].
///
/// The embedding provider is mandatory; the chunk limit defaults to
/// [`DEFAULT_MAX_CHARS`].
pub struct RagEngineBuilder {
    provider: Option<Arc<dyn EmbeddingProvider>>,
    max_chars: usize,
}

impl Default for RagEngineBuilder {
    fn default() -> Self {
        Self {
            provider: None,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl RagEngineBuilder {
    /// Set the embedding provider the engine will use for chunks and queries.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the chunk accumulation limit in characters.
    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Build an engine from a document file on disk.
    ///
    /// # Errors
    ///
    /// [`RagError::InvalidInput`] when no provider was configured, plus every
    /// failure mode of [`Document::load`] and corpus construction.
    pub async fn build_from_path(self, path: impl AsRef<Path>) -> Result<RagEngine, RagError> {
        let document = Document::load(path).await?;
        self.build_from_document(&document).await
    }

    /// Build an engine from already-loaded text.
    ///
    /// # Errors
    ///
    /// Same as [`build_from_path`](Self::build_from_path), minus the file
    /// read failures.
    pub async fn build_from_text(self, text: &str) -> Result<RagEngine, RagError> {
        let document = Document::from_text(text);
        self.build_from_document(&document).await
    }

    /// Build an engine from a [`Document`].
    ///
    /// # Errors
    ///
    /// [`RagError::InvalidInput`] when no provider was configured; otherwise
    /// chunking and embedding failures propagate unchanged.
    pub async fn build_from_document(self, document: &Document) -> Result<RagEngine, RagError> {
        let provider = self
            .provider
            .ok_or_else(|| RagError::invalid_input("no embedding provider configured"))?;
        let corpus = corpus_from_document(document, provider.as_ref(), self.max_chars).await?;
        info!(
            chunks = corpus.len(),
            dimension = corpus.dimension(),
            "engine ready"
        );
        Ok(RagEngine { corpus, provider })
    }
}

/// One handle over the full pipeline: chunked corpus plus the provider used
/// to embed queries against it.
pub struct RagEngine {
    corpus: Corpus,
    provider: Arc<dyn EmbeddingProvider>,
}

impl RagEngine {
    /// Start configuring an engine.
    #[must_use]
    pub fn builder() -> RagEngineBuilder {
        RagEngineBuilder::default()
    }

    /// The corpus this engine answers from.
    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The chunk most similar to `query`.
    ///
    /// # Errors
    ///
    /// Embedding failures, [`RagError::EmptyCorpus`] on a chunkless corpus,
    /// and [`RagError::DegenerateEmbedding`] on a zero-norm query vector.
    pub async fn retrieve(&self, query: &str) -> Result<&Chunk, RagError> {
        let query_embedding = self.embed_query(query).await?;
        let chunk = self.corpus.best_match(&query_embedding)?;
        info!(chunk = chunk.index, "retrieved context");
        Ok(chunk)
    }

    /// The `top_k` most similar chunks with their scores, best first.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`retrieve`](Self::retrieve).
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<(&Chunk, f32)>, RagError> {
        let query_embedding = self.embed_query(query).await?;
        self.corpus.search(&query_embedding, top_k)
    }

    /// Answer `query` by wrapping the best-matching chunk in the answer
    /// template.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`retrieve`](Self::retrieve).
    pub async fn answer(&self, query: &str) -> Result<String, RagError> {
        let chunk = self.retrieve(query).await?;
        Ok(format_answer(&chunk.text))
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, RagError> {
        let mut vectors = self.provider.embed(&[query]).await?;
        if vectors.len() != 1 {
            return Err(EmbeddingError::BatchShape {
                expected: 1,
                got: vectors.len(),
            }
            .into());
        }
        Ok(vectors.swap_remove(0))
    }
}

impl fmt::Debug for RagEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RagEngine")
            .field("chunks", &self.corpus.len())
            .field("dimension", &self.corpus.dimension())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingProvider;

    const TWO_FACTS: &str = "The Eiffel Tower is in Paris. Everest is the tallest mountain.";

    fn mock() -> Arc<dyn EmbeddingProvider> {
        Arc::new(MockEmbeddingProvider::new())
    }

    #[tokio::test]
    async fn builder_requires_a_provider() {
        let err = RagEngine::builder()
            .build_from_text("hello.")
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn default_limit_packs_short_documents_into_one_chunk() {
        let engine = RagEngine::builder()
            .with_provider(mock())
            .build_from_text(TWO_FACTS)
            .await
            .unwrap();
        assert_eq!(engine.corpus().len(), 1);
    }

    #[tokio::test]
    async fn tighter_limit_splits_the_same_document() {
        let engine = RagEngine::builder()
            .with_provider(mock())
            .with_max_chars(40)
            .build_from_text(TWO_FACTS)
            .await
            .unwrap();
        assert_eq!(engine.corpus().len(), 2);
    }

    #[tokio::test]
    async fn exact_chunk_text_retrieves_that_chunk() {
        let engine = RagEngine::builder()
            .with_provider(mock())
            .with_max_chars(40)
            .build_from_text(TWO_FACTS)
            .await
            .unwrap();

        let chunk = engine.retrieve("The Eiffel Tower is in Paris.").await.unwrap();
        assert_eq!(chunk.index, 0);
        assert_eq!(chunk.text, "The Eiffel Tower is in Paris.");

        let answer = engine.answer("The Eiffel Tower is in Paris.").await.unwrap();
        assert_eq!(
            answer,
            "Based on the document: The Eiffel Tower is in Paris."
        );
    }

    #[tokio::test]
    async fn search_ranks_the_exact_match_first() {
        let engine = RagEngine::builder()
            .with_provider(mock())
            .with_max_chars(40)
            .build_from_text(TWO_FACTS)
            .await
            .unwrap();

        let hits = engine
            .search("Everest is the tallest mountain.", 2)
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0.text, "Everest is the tallest mountain.");
        assert!(hits[0].1 > hits[1].1);
    }

    #[tokio::test]
    async fn empty_document_builds_but_rejects_retrieval() {
        let engine = RagEngine::builder()
            .with_provider(mock())
            .build_from_text("")
            .await
            .unwrap();
        assert!(engine.corpus().is_empty());

        let err = engine.retrieve("anything").await.unwrap_err();
        assert!(err.is_empty_corpus());
    }
}
