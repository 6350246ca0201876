//! ```text
//! knowledge.txt ──► Document::load ──► SentenceChunker ──► chunks
//!                                                            │
//!                                    EmbeddingProvider ◄─────┤ (one batch)
//!                                           │                │
//!                                           ▼                ▼
//!                                    query vector ──►  Corpus (chunks ∥ vectors)
//!                                           │                │
//!                                           └── cosine + stable argmax
//!                                                            │
//!                                                            ▼
//!                              "Based on the document: {chunk}"
//!
//! goldens.json ──► GoldenSet ──► EvalHarness ──► Judge ──► EvalReport
//! ```
//!
//! # ragprobe
//!
//! **A deterministic retrieval-augmented answering pipeline with a built-in
//! golden-set evaluation harness.**
//!
//! `ragprobe` loads a plain-text document, splits it into sentence-packed
//! chunks, embeds them once, and answers questions by cosine similarity
//! against the chunk embeddings. There is no generation step: the answer is
//! the best-matching chunk wrapped in a fixed template, which makes every
//! stage reproducible and cheap to evaluate. The [`eval`] module replays
//! golden question/answer pairs through the pipeline and scores them with
//! deterministic lexical judges.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use ragprobe::embedding::MockEmbeddingProvider;
//! use ragprobe::engine::RagEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ragprobe::error::RagError> {
//!     let engine = RagEngine::builder()
//!         .with_provider(Arc::new(MockEmbeddingProvider::new()))
//!         .with_max_chars(40)
//!         .build_from_text("The Eiffel Tower is in Paris. Everest is the tallest mountain.")
//!         .await?;
//!
//!     let answer = engine.answer("The Eiffel Tower is in Paris.").await?;
//!     assert_eq!(answer, "Based on the document: The Eiffel Tower is in Paris.");
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`document`]: UTF-8 document loading with trimmed text
//! - [`chunking`]: greedy sentence-packing chunker with a character limit
//! - [`embedding`]: the provider trait plus mock, HTTP, and caching backends
//! - [`retrieval`]: cosine similarity, stable argmax, and the [`retrieval::Corpus`]
//! - [`answer`]: the fixed answer template
//! - [`engine`]: one handle wiring the pipeline end to end
//! - [`eval`]: golden sets, lexical judges, and run reports
//! - [`error`]: the crate-wide error taxonomy

#![warn(missing_docs)]

pub mod answer;
pub mod chunking;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod eval;
pub mod retrieval;

/// Re-exports for convenient access to core types
pub mod prelude {
    pub use crate::answer::{ANSWER_PREFIX, format_answer};
    pub use crate::chunking::{Chunk, DEFAULT_MAX_CHARS, SentenceChunker};
    pub use crate::document::Document;
    pub use crate::embedding::{
        CachingEmbeddingProvider, EmbeddingError, EmbeddingProvider, MockEmbeddingProvider,
        RemoteEmbeddingConfig, RemoteEmbeddingProvider,
    };
    pub use crate::engine::{RagEngine, RagEngineBuilder};
    pub use crate::error::RagError;
    pub use crate::eval::{
        EvalError, EvalHarness, EvalReport, Golden, GoldenSet, Judge, LexicalJudge, Similarity,
        Verdict,
    };
    pub use crate::retrieval::{Corpus, build_corpus, corpus_from_document};
}
