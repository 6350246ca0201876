#![allow(dead_code)]

use std::sync::Arc;

use ragprobe::prelude::*;

/// Three sentences of 37, 47, and 39 characters. At the default limit the
/// first two pack together; at 50 every sentence is its own chunk.
pub const KNOWLEDGE: &str = "The Eiffel Tower is located in Paris. \
    Mount Everest is the tallest mountain on Earth. \
    The Pacific Ocean is the largest ocean.";

pub fn mock_provider() -> Arc<dyn EmbeddingProvider> {
    Arc::new(MockEmbeddingProvider::new())
}

/// Write [`KNOWLEDGE`] into `dir` and build an engine over it at a 50-char
/// limit, so every sentence is retrievable on its own.
pub async fn knowledge_engine(dir: &tempfile::TempDir) -> RagEngine {
    let path = dir.path().join("knowledge.txt");
    std::fs::write(&path, KNOWLEDGE).unwrap();
    RagEngine::builder()
        .with_provider(mock_provider())
        .with_max_chars(50)
        .build_from_path(&path)
        .await
        .unwrap()
}
