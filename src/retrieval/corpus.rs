//! Corpus construction and nearest-chunk lookup.
//!
//! A [`Corpus`] replaces the ambient chunks-and-embeddings state a quick
//! script would keep at module level: one object, built once through the
//! [`build_corpus`] factory, owned by whoever needs it, holding chunks and
//! their embeddings in positional lockstep.

use std::path::Path;

use tracing::{debug, warn};

use super::similarity::{cosine_similarity, stable_argmax};
use crate::chunking::{Chunk, SentenceChunker};
use crate::document::Document;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::error::RagError;

/// Chunks and their embeddings for one document, in positional lockstep.
///
/// Construction enforces the invariants retrieval relies on: chunk and
/// embedding counts match, every embedding has the same dimension, and no
/// chunk embedding has zero norm. After that the corpus is immutable.
#[derive(Debug, Clone)]
pub struct Corpus {
    chunks: Vec<Chunk>,
    embeddings: Vec<Vec<f32>>,
    dimension: usize,
}

impl Corpus {
    /// Assemble a corpus from parallel chunk and embedding sequences.
    ///
    /// # Errors
    ///
    /// - [`RagError::InvalidInput`] when counts differ or rows have
    ///   inconsistent dimensions.
    /// - [`RagError::DegenerateEmbedding`] when a chunk vector has zero norm
    ///   (the offending chunk index is named).
    pub fn new(chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<Self, RagError> {
        if chunks.len() != embeddings.len() {
            return Err(RagError::invalid_input(format!(
                "{} chunks but {} embeddings; counts must match",
                chunks.len(),
                embeddings.len()
            )));
        }
        let dimension = embeddings.first().map_or(0, Vec::len);
        for (idx, vector) in embeddings.iter().enumerate() {
            if vector.len() != dimension {
                return Err(RagError::invalid_input(format!(
                    "embedding {idx} has dimension {}, expected {dimension}",
                    vector.len()
                )));
            }
            if vector.iter().map(|v| v * v).sum::<f32>() == 0.0 {
                return Err(RagError::DegenerateEmbedding {
                    context: format!("chunk {idx}"),
                });
            }
        }
        Ok(Self {
            chunks,
            embeddings,
            dimension,
        })
    }

    /// Number of chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when the corpus holds no chunks; retrieval then always fails.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Embedding dimensionality (zero for an empty corpus).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The chunks in document order.
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The chunk whose embedding is most cosine-similar to `query_embedding`.
    ///
    /// Exact similarity ties resolve to the earliest chunk in document order
    /// (stable argmax), so repeated lookups are deterministic.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyCorpus`] when no chunks exist.
    /// - [`RagError::InvalidInput`] when the query dimension does not match.
    /// - [`RagError::DegenerateEmbedding`] when the query vector has zero
    ///   norm.
    pub fn best_match(&self, query_embedding: &[f32]) -> Result<&Chunk, RagError> {
        let scores = self.score_all(query_embedding)?;
        let idx = stable_argmax(&scores).ok_or(RagError::EmptyCorpus)?;
        debug!(chunk = idx, score = scores[idx], "best match selected");
        Ok(&self.chunks[idx])
    }

    /// Top-`top_k` chunks by descending similarity.
    ///
    /// Ordering is total and deterministic: higher score first, earlier chunk
    /// first on exact ties, consistent with [`best_match`](Self::best_match).
    /// Fewer than `top_k` results are returned when the corpus is smaller.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`best_match`](Self::best_match).
    pub fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<(&Chunk, f32)>, RagError> {
        let scores = self.score_all(query_embedding)?;
        let mut ranked: Vec<(usize, f32)> = scores.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(top_k);
        Ok(ranked
            .into_iter()
            .map(|(idx, score)| (&self.chunks[idx], score))
            .collect())
    }

    /// Cosine score of every chunk against the query, in chunk order.
    fn score_all(&self, query_embedding: &[f32]) -> Result<Vec<f32>, RagError> {
        if self.chunks.is_empty() {
            return Err(RagError::EmptyCorpus);
        }
        if query_embedding.len() != self.dimension {
            return Err(RagError::invalid_input(format!(
                "query dimension {} does not match corpus dimension {}",
                query_embedding.len(),
                self.dimension
            )));
        }
        if query_embedding.iter().map(|v| v * v).sum::<f32>() == 0.0 {
            return Err(RagError::DegenerateEmbedding {
                context: "query".to_string(),
            });
        }
        let mut scores = Vec::with_capacity(self.embeddings.len());
        for (idx, vector) in self.embeddings.iter().enumerate() {
            let score = cosine_similarity(query_embedding, vector).ok_or_else(|| {
                RagError::DegenerateEmbedding {
                    context: format!("chunk {idx}"),
                }
            })?;
            scores.push(score);
        }
        Ok(scores)
    }
}

/// Build a [`Corpus`] from a document file: load, chunk, embed once.
///
/// The embedding collaborator is an explicit parameter; the corpus carries no
/// ambient state and lives exactly as long as its owner keeps it. All chunks
/// go through a single batched `embed` call.
///
/// Building from an empty document succeeds with zero chunks (logged at
/// `warn`); retrieval against it then fails with [`RagError::EmptyCorpus`].
///
/// # Errors
///
/// Propagates loading failures ([`RagError::NotFound`],
/// [`RagError::InvalidInput`], [`RagError::Io`]) and embedding collaborator
/// failures ([`RagError::Embedding`]) unmodified.
pub async fn build_corpus(
    path: impl AsRef<Path>,
    provider: &dyn EmbeddingProvider,
    max_chars: usize,
) -> Result<Corpus, RagError> {
    let document = Document::load(path).await?;
    corpus_from_document(&document, provider, max_chars).await
}

/// Build a [`Corpus`] from an already-loaded document.
///
/// Same semantics as [`build_corpus`] minus the file read.
///
/// # Errors
///
/// Embedding collaborator failures and corpus validation failures, per
/// [`build_corpus`].
pub async fn corpus_from_document(
    document: &Document,
    provider: &dyn EmbeddingProvider,
    max_chars: usize,
) -> Result<Corpus, RagError> {
    let chunks = SentenceChunker::new(max_chars).chunk(document.text());
    if chunks.is_empty() {
        warn!("document produced no chunks; the corpus will reject retrieval");
        return Corpus::new(Vec::new(), Vec::new());
    }
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    let embeddings = provider.embed(&texts).await?;
    if embeddings.len() != chunks.len() {
        return Err(EmbeddingError::BatchShape {
            expected: chunks.len(),
            got: embeddings.len(),
        }
        .into());
    }
    debug!(
        chunks = chunks.len(),
        dimension = provider.dimension(),
        max_chars,
        "corpus built"
    );
    Corpus::new(chunks, embeddings)
}
