//! Judges score an actual answer against a golden's expected answer.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::EvalError;

/// Score at or above which a case passes, unless overridden.
pub const DEFAULT_PASS_THRESHOLD: f64 = 0.7;

/// A judge's decision on one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Similarity in `[0.0, 1.0]`.
    pub score: f64,
    /// Whether the score cleared the judge's threshold.
    pub passed: bool,
    /// One-line explanation, populated for failed cases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Scores an actual answer against the expected one.
///
/// `input` is the original question; lexical judges ignore it, but judges
/// that weigh answer relevance need it.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Short name identifying the judge in reports.
    fn name(&self) -> &str;

    /// Judge one case.
    async fn judge(
        &self,
        input: &str,
        actual: &str,
        expected: &str,
    ) -> Result<Verdict, EvalError>;
}

/// How [`LexicalJudge`] compares two answers.
///
/// All modes compare normalized text: Unicode words, lowercased, with
/// punctuation dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    /// Normalized texts must be identical.
    Exact,
    /// One normalized text must contain the other.
    Contains,
    /// F1 over the token multisets of both normalized texts.
    #[default]
    TokenF1,
}

/// Deterministic text-overlap judge.
///
/// Because it never consults a model, its verdicts are reproducible and it
/// costs nothing to run in CI. Scores below the threshold fail the case with
/// a reason naming both numbers.
#[derive(Debug, Clone)]
pub struct LexicalJudge {
    similarity: Similarity,
    threshold: f64,
}

impl LexicalJudge {
    /// Judge using `similarity` with [`DEFAULT_PASS_THRESHOLD`].
    #[must_use]
    pub fn new(similarity: Similarity) -> Self {
        Self {
            similarity,
            threshold: DEFAULT_PASS_THRESHOLD,
        }
    }

    /// Override the pass threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&threshold),
            "threshold must lie in [0, 1]"
        );
        self.threshold = threshold;
        self
    }

    /// The comparison mode in use.
    #[must_use]
    pub fn similarity(&self) -> Similarity {
        self.similarity
    }

    /// The pass threshold in use.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn score(&self, actual: &str, expected: &str) -> f64 {
        let actual = normalize(actual);
        let expected = normalize(expected);
        match self.similarity {
            Similarity::Exact => {
                if actual == expected {
                    1.0
                } else {
                    0.0
                }
            }
            Similarity::Contains => {
                if actual.contains(&expected) || expected.contains(&actual) {
                    1.0
                } else {
                    0.0
                }
            }
            Similarity::TokenF1 => token_f1(&actual, &expected),
        }
    }
}

impl Default for LexicalJudge {
    fn default() -> Self {
        Self::new(Similarity::default())
    }
}

#[async_trait]
impl Judge for LexicalJudge {
    fn name(&self) -> &str {
        match self.similarity {
            Similarity::Exact => "lexical_exact",
            Similarity::Contains => "lexical_contains",
            Similarity::TokenF1 => "lexical_token_f1",
        }
    }

    async fn judge(
        &self,
        _input: &str,
        actual: &str,
        expected: &str,
    ) -> Result<Verdict, EvalError> {
        let score = self.score(actual, expected);
        let passed = score >= self.threshold;
        let reason = (!passed).then(|| {
            format!(
                "{} score {score:.3} below threshold {:.3}",
                self.name(),
                self.threshold
            )
        });
        Ok(Verdict {
            score,
            passed,
            reason,
        })
    }
}

/// Lowercased Unicode words joined by single spaces.
fn normalize(text: &str) -> String {
    text.unicode_words()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// F1 over token multisets. Repeated tokens only count as often as they
/// appear on both sides.
fn token_f1(actual: &str, expected: &str) -> f64 {
    let actual_tokens: Vec<&str> = actual.split_whitespace().collect();
    let expected_tokens: Vec<&str> = expected.split_whitespace().collect();
    if actual_tokens.is_empty() && expected_tokens.is_empty() {
        return 1.0;
    }
    if actual_tokens.is_empty() || expected_tokens.is_empty() {
        return 0.0;
    }

    let mut expected_counts: HashMap<&str, usize> = HashMap::new();
    for &token in &expected_tokens {
        *expected_counts.entry(token).or_insert(0) += 1;
    }
    let mut overlap = 0usize;
    for &token in &actual_tokens {
        if let Some(count) = expected_counts.get_mut(token) {
            if *count > 0 {
                *count -= 1;
                overlap += 1;
            }
        }
    }
    if overlap == 0 {
        return 0.0;
    }

    let precision = overlap as f64 / actual_tokens.len() as f64;
    let recall = overlap as f64 / expected_tokens.len() as f64;
    2.0 * precision * recall / (precision + recall)
}
