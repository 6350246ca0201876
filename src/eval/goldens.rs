//! Golden cases: question and expected answer pairs stored as JSON.

use std::path::Path;
use std::slice;

use serde::{Deserialize, Serialize};
use tokio::fs;

use super::EvalError;

/// One golden case: a question and the answer the pipeline should give.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Golden {
    /// Stable identifier; the harness assigns positional ids when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The question posed to the engine.
    pub input: String,
    /// The answer the engine is expected to produce.
    pub expected_output: String,
}

impl Golden {
    /// Case without an explicit id.
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            id: None,
            input: input.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Attach a stable id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// An ordered collection of golden cases.
///
/// Serializes as a bare JSON array, so a goldens file is just:
///
/// ```json
/// [
///   {"input": "Where is the Eiffel Tower?",
///    "expected_output": "Based on the document: The Eiffel Tower is in Paris."}
/// ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoldenSet {
    goldens: Vec<Golden>,
}

impl GoldenSet {
    /// Set holding the given cases in order.
    #[must_use]
    pub fn new(goldens: Vec<Golden>) -> Self {
        Self { goldens }
    }

    /// Load a golden set from a JSON file.
    ///
    /// # Errors
    ///
    /// [`EvalError::Io`] when the file cannot be read, [`EvalError::Parse`]
    /// when it is not a JSON array of cases.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, EvalError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .await
            .map_err(|source| EvalError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| EvalError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the set to a JSON file, pretty-printed.
    ///
    /// # Errors
    ///
    /// [`EvalError::Report`] on serialization failure, [`EvalError::Io`] on
    /// write failure.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), EvalError> {
        let path = path.as_ref();
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).await.map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goldens.len()
    }

    /// True when the set holds no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goldens.is_empty()
    }

    /// The cases in order.
    #[must_use]
    pub fn goldens(&self) -> &[Golden] {
        &self.goldens
    }

    /// Iterate over the cases in order.
    pub fn iter(&self) -> slice::Iter<'_, Golden> {
        self.goldens.iter()
    }
}

impl<'a> IntoIterator for &'a GoldenSet {
    type Item = &'a Golden;
    type IntoIter = slice::Iter<'a, Golden>;

    fn into_iter(self) -> Self::IntoIter {
        self.goldens.iter()
    }
}
