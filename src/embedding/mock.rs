//! Deterministic hash-based embeddings for tests and offline development.

use async_trait::async_trait;

use super::{EmbeddingError, EmbeddingProvider};

/// Default dimensionality, matching small sentence-embedding models.
pub const DEFAULT_MOCK_DIMENSION: usize = 384;

/// Embedding provider that derives vectors from a text hash.
///
/// The same text always yields the same vector, so pipelines built on this
/// provider are fully reproducible. Components are strictly positive before
/// L2 normalization, so no vector it returns has zero norm.
///
/// Vectors carry no semantic signal. Retrieval against them only ranks an
/// exact text match above everything else, which is what deterministic tests
/// need.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    dimension: usize,
}

impl MockEmbeddingProvider {
    /// Provider with the default dimension.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dimension(DEFAULT_MOCK_DIMENSION)
    }

    /// Provider with an explicit dimension.
    #[must_use]
    pub fn with_dimension(dimension: usize) -> Self {
        debug_assert!(dimension > 0, "mock embeddings need at least one component");
        Self { dimension }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let seed = text
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        let mut state = seed;
        let mut vector: Vec<f32> = (0..self.dimension)
            .map(|_| {
                // Knuth MMIX step; each component draws fresh state so two
                // texts only collide if every component collides.
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                (((state >> 33) % 1000) + 1) as f32 / 1000.0
            })
            .collect();
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        for v in &mut vector {
            *v /= norm;
        }
        vector
    }
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }
}
