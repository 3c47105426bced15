//! @acp:module "Answers"
//! @acp:summary "Answer values keyed by question id, with scalar/array normalization"
//! @acp:domain wizard
//! @acp:layer model

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single answer: free text or one choice, or the selections of a
/// multi-choice question in selection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(Vec<String>),
}

impl AnswerValue {
    pub fn single(value: impl Into<String>) -> Self {
        AnswerValue::Single(value.into())
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::Multi(values.into_iter().map(Into::into).collect())
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            AnswerValue::Single(s) => Some(s),
            AnswerValue::Multi(_) => None,
        }
    }

    /// Collapse to one string, joining selections with ", "
    pub fn to_scalar(&self) -> String {
        match self {
            AnswerValue::Single(s) => s.clone(),
            AnswerValue::Multi(values) => values.join(", "),
        }
    }

    /// Expand to a list, wrapping a lone scalar
    pub fn to_array(&self) -> Vec<String> {
        match self {
            AnswerValue::Single(s) => vec![s.clone()],
            AnswerValue::Multi(values) => values.clone(),
        }
    }

    /// Presence check used by the wizard before advancing
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Single(s) => s.trim().is_empty(),
            AnswerValue::Multi(values) => values.is_empty(),
        }
    }
}

/// @acp:summary "Answers collected by the wizard, keyed by question id"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, question_id: impl Into<String>, value: AnswerValue) {
        self.values.insert(question_id.into(), value);
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.values.get(question_id)
    }

    pub fn remove(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.values.remove(question_id)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.get(question_id).map(|v| !v.is_blank()).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Toggle one selection of a multi-choice answer, keeping selection order.
    ///
    /// A previous scalar answer is treated as a single selection.
    pub fn toggle(&mut self, question_id: &str, value: &str) {
        let mut current = self.array(question_id);
        if let Some(pos) = current.iter().position(|v| v == value) {
            current.remove(pos);
        } else {
            current.push(value.to_string());
        }
        self.set(question_id, AnswerValue::Multi(current));
    }

    /// Answer as one string; absent answers become ""
    pub fn scalar(&self, question_id: &str) -> String {
        self.get(question_id)
            .map(AnswerValue::to_scalar)
            .unwrap_or_default()
    }

    /// Answer as a list; absent answers become an empty list
    pub fn array(&self, question_id: &str) -> Vec<String> {
        self.get(question_id)
            .map(AnswerValue::to_array)
            .unwrap_or_default()
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load answers from a `.json`, `.yaml` or `.yml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, AnswerValue)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, AnswerValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
