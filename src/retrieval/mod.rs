//! Similarity scoring and nearest-chunk retrieval.
//!
//! Two layers live here:
//!
//! * [`similarity`]: pure vector math, cosine similarity and the stable
//!   argmax that breaks ties toward the earlier index.
//! * [`corpus`]: the [`Corpus`] container plus the [`build_corpus`] factory
//!   that loads, chunks, and embeds a document in one call.

pub mod corpus;
pub mod similarity;

pub use corpus::{Corpus, build_corpus, corpus_from_document};
pub use similarity::{cosine_similarity, stable_argmax};
