//! Evaluation result reporting.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::judge::Verdict;

/// Outcome of one golden case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// Case identifier, from the golden or assigned positionally.
    pub id: String,
    /// The question that was asked.
    pub input: String,
    /// The answer the golden expected.
    pub expected: String,
    /// The answer the engine produced.
    pub actual: String,
    /// The judge's decision.
    pub verdict: Verdict,
}

/// Summary statistics for an evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
    /// Total number of cases.
    pub total: usize,
    /// Cases that passed.
    pub passed: usize,
    /// Cases that failed.
    pub failed: usize,
    /// Pass rate in `[0.0, 1.0]`; zero for an empty run.
    pub pass_rate: f64,
    /// Mean judge score across all cases; zero for an empty run.
    pub mean_score: f64,
}

impl EvalSummary {
    /// Fold per-case outcomes into summary statistics.
    pub fn from_cases(cases: &[CaseOutcome]) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.verdict.passed).count();
        let failed = total - passed;
        let pass_rate = if total > 0 {
            passed as f64 / total as f64
        } else {
            0.0
        };
        let mean_score = if total > 0 {
            cases.iter().map(|c| c.verdict.score).sum::<f64>() / total as f64
        } else {
            0.0
        };

        Self {
            total,
            passed,
            failed,
            pass_rate,
            mean_score,
        }
    }
}

/// Complete report for one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// Unique identifier for this run.
    pub run_id: String,
    /// Name of the judge that scored the run.
    pub judge: String,
    /// When the run started.
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// When the run completed.
    pub completed_at: chrono::DateTime<chrono::Utc>,
    /// Total wall-clock duration.
    pub duration: Duration,
    /// Per-case outcomes, in golden order.
    pub cases: Vec<CaseOutcome>,
    /// Summary statistics.
    pub summary: EvalSummary,
}

impl EvalReport {
    /// Assemble a report; the completion timestamp is taken now.
    pub fn new(
        run_id: impl Into<String>,
        judge: impl Into<String>,
        cases: Vec<CaseOutcome>,
        started_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let completed_at = chrono::Utc::now();
        let duration = (completed_at - started_at).to_std().unwrap_or_default();
        let summary = EvalSummary::from_cases(&cases);

        Self {
            run_id: run_id.into(),
            judge: judge.into(),
            started_at,
            completed_at,
            duration,
            cases,
            summary,
        }
    }

    /// True when every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.summary.failed == 0
    }

    /// The failed cases only.
    pub fn failures(&self) -> Vec<&CaseOutcome> {
        self.cases.iter().filter(|c| !c.verdict.passed).collect()
    }

    /// Format as a human-readable block.
    pub fn format_summary(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Evaluation Report: {}\n", self.run_id));
        output.push_str(&format!("Judge: {}\n", self.judge));
        output.push_str(&format!("Duration: {:?}\n", self.duration));
        output.push_str("\nSummary:\n");
        output.push_str(&format!("  Total: {}\n", self.summary.total));
        output.push_str(&format!("  Passed: {}\n", self.summary.passed));
        output.push_str(&format!("  Failed: {}\n", self.summary.failed));
        output.push_str(&format!(
            "  Pass Rate: {:.1}%\n",
            self.summary.pass_rate * 100.0
        ));
        output.push_str(&format!("  Mean Score: {:.3}\n", self.summary.mean_score));

        if self.summary.failed > 0 {
            output.push_str("\nFailed Cases:\n");
            for case in self.failures() {
                output.push_str(&format!(
                    "  - {} (score {:.3})\n",
                    case.id, case.verdict.score
                ));
                if let Some(reason) = &case.verdict.reason {
                    output.push_str(&format!("    {reason}\n"));
                }
            }
        }

        output
    }

    /// Export to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Serialization failures from `serde_json`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
