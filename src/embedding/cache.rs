//! Caching decorator that avoids re-embedding previously seen text.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::{EmbeddingError, EmbeddingProvider};

/// Cache effectiveness counters, cumulative over the provider's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Texts answered from the cache.
    pub hits: u64,
    /// Texts that had to go to the inner provider.
    pub misses: u64,
    /// Distinct texts currently cached.
    pub entries: usize,
}

/// Wraps any [`EmbeddingProvider`] and memoizes vectors by exact text.
///
/// Within a batch, only texts absent from the cache are forwarded to the
/// inner provider (as one sub-batch); output order always matches input
/// order. Useful when the same document is rebuilt repeatedly or the same
/// queries recur, and it keeps mock-backed test pipelines honest about how
/// often they embed.
pub struct CachingEmbeddingProvider {
    inner: Arc<dyn EmbeddingProvider>,
    cache: RwLock<HashMap<String, Vec<f32>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachingEmbeddingProvider {
    /// Wrap `inner` with an empty cache.
    #[must_use]
    pub fn new(inner: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Current counters and cache size.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.read().len(),
        }
    }

    /// Drop all cached vectors. Hit and miss counters are not reset.
    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

impl fmt::Debug for CachingEmbeddingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingEmbeddingProvider")
            .field("entries", &self.cache.read().len())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EmbeddingProvider for CachingEmbeddingProvider {
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut resolved: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        let mut missing: Vec<usize> = Vec::new();
        {
            // The guard must not live across the await below.
            let cache = self.cache.read();
            for (idx, text) in texts.iter().enumerate() {
                match cache.get(*text) {
                    Some(vector) => resolved[idx] = Some(vector.clone()),
                    None => missing.push(idx),
                }
            }
        }
        self.hits
            .fetch_add((texts.len() - missing.len()) as u64, Ordering::Relaxed);
        self.misses.fetch_add(missing.len() as u64, Ordering::Relaxed);

        if !missing.is_empty() {
            let batch: Vec<&str> = missing.iter().map(|&idx| texts[idx]).collect();
            let vectors = self.inner.embed(&batch).await?;
            if vectors.len() != batch.len() {
                return Err(EmbeddingError::BatchShape {
                    expected: batch.len(),
                    got: vectors.len(),
                });
            }
            let mut cache = self.cache.write();
            for (&idx, vector) in missing.iter().zip(vectors) {
                cache.insert(texts[idx].to_string(), vector.clone());
                resolved[idx] = Some(vector);
            }
            debug!(
                embedded = batch.len(),
                cached = texts.len() - batch.len(),
                "cache filled from inner provider"
            );
        }

        // Guard against a hole before flattening; flatten would hide one.
        let filled = resolved.iter().filter(|slot| slot.is_some()).count();
        if filled != resolved.len() {
            return Err(EmbeddingError::BatchShape {
                expected: resolved.len(),
                got: filled,
            });
        }
        Ok(resolved.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingProvider;

    struct CountingProvider {
        inner: MockEmbeddingProvider,
        calls: AtomicU64,
        texts_embedded: AtomicU64,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                inner: MockEmbeddingProvider::with_dimension(8),
                calls: AtomicU64::new(0),
                texts_embedded: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for CountingProvider {
        fn dimension(&self) -> usize {
            self.inner.dimension()
        }

        async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.texts_embedded
                .fetch_add(texts.len() as u64, Ordering::Relaxed);
            self.inner.embed(texts).await
        }
    }

    #[tokio::test]
    async fn repeat_batch_is_served_from_the_cache() {
        let counting = Arc::new(CountingProvider::new());
        let cache = CachingEmbeddingProvider::new(counting.clone());

        let first = cache.embed(&["a", "b"]).await.unwrap();
        let second = cache.embed(&["a", "b"]).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(counting.calls.load(Ordering::Relaxed), 1);
        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entries, 2);
    }

    #[tokio::test]
    async fn partial_overlap_only_embeds_new_texts() {
        let counting = Arc::new(CountingProvider::new());
        let cache = CachingEmbeddingProvider::new(counting.clone());

        cache.embed(&["a", "b"]).await.unwrap();
        cache.embed(&["b", "c"]).await.unwrap();

        assert_eq!(counting.calls.load(Ordering::Relaxed), 2);
        assert_eq!(counting.texts_embedded.load(Ordering::Relaxed), 3);
    }

    #[tokio::test]
    async fn order_is_preserved_for_mixed_hits_and_misses() {
        let counting = Arc::new(CountingProvider::new());
        let cache = CachingEmbeddingProvider::new(counting);

        cache.embed(&["b"]).await.unwrap();
        let mixed = cache.embed(&["a", "b", "c"]).await.unwrap();

        // The mock is deterministic, so a fresh provider gives the reference
        // vectors for each position.
        let reference = MockEmbeddingProvider::with_dimension(8)
            .embed(&["a", "b", "c"])
            .await
            .unwrap();
        assert_eq!(mixed, reference);
    }

    #[tokio::test]
    async fn duplicate_texts_share_one_entry() {
        let counting = Arc::new(CountingProvider::new());
        let cache = CachingEmbeddingProvider::new(counting);

        let vectors = cache.embed(&["x", "x"]).await.unwrap();

        assert_eq!(vectors[0], vectors[1]);
        assert_eq!(cache.stats().entries, 1);
    }

    #[tokio::test]
    async fn clear_empties_the_cache_but_keeps_counters() {
        let counting = Arc::new(CountingProvider::new());
        let cache = CachingEmbeddingProvider::new(counting.clone());

        cache.embed(&["a"]).await.unwrap();
        cache.clear();

        let stats = cache.stats();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.misses, 1);

        cache.embed(&["a"]).await.unwrap();
        assert_eq!(counting.calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn dimension_delegates_to_the_inner_provider() {
        let cache = CachingEmbeddingProvider::new(Arc::new(CountingProvider::new()));
        assert_eq!(cache.dimension(), 8);
    }
}
