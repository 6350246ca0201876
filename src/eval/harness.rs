//! Drives golden cases through an engine and folds verdicts into a report.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::EvalError;
use super::goldens::GoldenSet;
use super::judge::Judge;
use super::report::{CaseOutcome, EvalReport};
use crate::engine::RagEngine;

/// Replays golden cases against a [`RagEngine`], one at a time, in order.
///
/// A failing case is recorded and the run continues; a pipeline or judge
/// error aborts the run without producing a partial report.
pub struct EvalHarness {
    engine: RagEngine,
    judge: Arc<dyn Judge>,
}

impl EvalHarness {
    /// Harness over `engine`, scored by `judge`.
    #[must_use]
    pub fn new(engine: RagEngine, judge: Arc<dyn Judge>) -> Self {
        Self { engine, judge }
    }

    /// The engine under evaluation.
    #[must_use]
    pub fn engine(&self) -> &RagEngine {
        &self.engine
    }

    /// Run every case in `goldens` and assemble a report.
    ///
    /// Cases run strictly sequentially in golden order, so reports are
    /// reproducible for deterministic engines and judges. A golden without
    /// an id is identified as `case-{position}`.
    ///
    /// # Errors
    ///
    /// The first engine or judge error aborts the run.
    pub async fn run(&self, goldens: &GoldenSet) -> Result<EvalReport, EvalError> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now();
        info!(
            run_id = %run_id,
            cases = goldens.len(),
            judge = self.judge.name(),
            "evaluation started"
        );

        let mut cases = Vec::with_capacity(goldens.len());
        for (position, golden) in goldens.iter().enumerate() {
            let id = golden
                .id
                .clone()
                .unwrap_or_else(|| format!("case-{position}"));
            let actual = self.engine.answer(&golden.input).await?;
            let verdict = self
                .judge
                .judge(&golden.input, &actual, &golden.expected_output)
                .await?;
            if !verdict.passed {
                warn!(case = %id, score = verdict.score, "case failed");
            }
            cases.push(CaseOutcome {
                id,
                input: golden.input.clone(),
                expected: golden.expected_output.clone(),
                actual,
                verdict,
            });
        }

        let report = EvalReport::new(run_id, self.judge.name(), cases, started_at);
        info!(
            passed = report.summary.passed,
            failed = report.summary.failed,
            "evaluation finished"
        );
        Ok(report)
    }

    /// Load goldens from a JSON file and run them.
    ///
    /// # Errors
    ///
    /// Golden loading errors, plus everything [`run`](Self::run) can raise.
    pub async fn run_file(&self, path: impl AsRef<Path>) -> Result<EvalReport, EvalError> {
        let goldens = GoldenSet::load(path).await?;
        self.run(&goldens).await
    }
}
