//! Golden-set evaluation for the retrieval pipeline.
//!
//! The harness replays a set of golden cases (question plus expected answer)
//! through a [`RagEngine`](crate::engine::RagEngine), scores each actual
//! answer with a [`Judge`], and folds the verdicts into an [`EvalReport`]:
//!
//! ```text
//!   goldens.json ──▶ GoldenSet ──▶ EvalHarness ──▶ EvalReport
//!                                      │
//!                                 RagEngine.answer()
//!                                      │
//!                                   Judge.judge()
//! ```
//!
//! Judging here is lexical and deterministic; the same goldens against the
//! same corpus always yield the same report.

pub mod goldens;
pub mod harness;
pub mod judge;
pub mod report;

use std::path::PathBuf;

use thiserror::Error;

use crate::error::RagError;

pub use goldens::{Golden, GoldenSet};
pub use harness::EvalHarness;
pub use judge::{DEFAULT_PASS_THRESHOLD, Judge, LexicalJudge, Similarity, Verdict};
pub use report::{CaseOutcome, EvalReport, EvalSummary};

/// Failures raised while loading goldens or running an evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A golden file could not be read.
    #[error("failed to read golden file at {path}: {source}")]
    Io {
        /// Path being read when the failure occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A golden file held malformed JSON.
    #[error("failed to parse golden file at {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The pipeline under evaluation failed; the run aborts on the spot.
    #[error(transparent)]
    Rag(#[from] RagError),

    /// A report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
