//! @acp:module "Question Catalogue"
//! @acp:summary "Static backward-design questions, stage metadata and activation rules"
//! @acp:domain wizard
//! @acp:layer model
//!
//! The catalogue is reference data: it is built once, never mutated, and
//! handed by reference to whoever needs it (the wizard, the compiler, the
//! CLI). Nothing reaches it through a global.

mod builtin;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::error::{Result, SophiaError};

/// How a question collects its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Text,
    Textarea,
    SingleChoice,
    MultiChoice,
    TextareaWithUpload,
}

impl QuestionType {
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultiChoice)
    }

    pub fn accepts_uploads(&self) -> bool {
        matches!(self, QuestionType::TextareaWithUpload)
    }

    /// Serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Textarea => "textarea",
            QuestionType::SingleChoice => "single-choice",
            QuestionType::MultiChoice => "multi-choice",
            QuestionType::TextareaWithUpload => "textarea-with-upload",
        }
    }
}

/// One of the three backward-design stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    One,
    Two,
    Three,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[Stage::One, Stage::Two, Stage::Three]
    }

    pub fn number(&self) -> u8 {
        match self {
            Stage::One => 1,
            Stage::Two => 2,
            Stage::Three => 3,
        }
    }

    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::One => Some(Stage::Two),
            Stage::Two => Some(Stage::Three),
            Stage::Three => None,
        }
    }

    pub fn previous(&self) -> Option<Stage> {
        match self {
            Stage::One => None,
            Stage::Two => Some(Stage::One),
            Stage::Three => Some(Stage::Two),
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Stage::One),
            2 => Ok(Stage::Two),
            3 => Ok(Stage::Three),
            n => Err(format!("Invalid stage {}: expected 1, 2 or 3", n)),
        }
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A selectable option of a choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// When a question takes part in the wizard
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Activation {
    #[default]
    Always,
    /// Active only while another question's answer equals `value`
    WhenAnswerEquals { question: String, value: String },
}

impl Activation {
    /// Evaluate against the answers given so far
    pub fn is_active(&self, answers: &AnswerSet) -> bool {
        match self {
            Activation::Always => true,
            Activation::WhenAnswerEquals { question, value } => answers
                .get(question)
                .and_then(|answer| answer.as_single())
                .map(|answer| answer == value)
                .unwrap_or(false),
        }
    }
}

/// @acp:summary "A catalogued question"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub stage: Stage,
    pub stage_title: String,
    pub text: String,
    pub explanation: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_file_types: Option<String>,
    #[serde(default)]
    pub activation: Activation,
}

impl Question {
    /// Look up an option by its value
    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Display metadata shown when a stage begins
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// @acp:summary "Immutable question catalogue"
/// @acp:lock normal
#[derive(Debug, Clone)]
pub struct Catalogue {
    questions: Vec<Question>,
}

impl Catalogue {
    /// Build a catalogue, checking its invariants
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        let catalogue = Self { questions };
        catalogue.validate()?;
        Ok(catalogue)
    }

    /// The built-in backward-design questionnaire
    pub fn builtin() -> Self {
        Self {
            questions: builtin::questions(),
        }
    }

    /// Check that ids are unique, choice questions have options and option
    /// values are unique within a question
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for question in &self.questions {
            if !ids.insert(question.id.as_str()) {
                return Err(SophiaError::InvalidCatalogue(format!(
                    "duplicate question id '{}'",
                    question.id
                )));
            }

            if question.question_type.is_choice() && question.options.is_empty() {
                return Err(SophiaError::InvalidCatalogue(format!(
                    "choice question '{}' has no options",
                    question.id
                )));
            }

            let mut values = HashSet::new();
            for option in &question.options {
                if !values.insert(option.value.as_str()) {
                    return Err(SophiaError::InvalidCatalogue(format!(
                        "question '{}' repeats option value '{}'",
                        question.id, option.value
                    )));
                }
            }

            if let Activation::WhenAnswerEquals { question: dep, .. } = &question.activation {
                if !self.questions.iter().any(|q| &q.id == dep) {
                    return Err(SophiaError::InvalidCatalogue(format!(
                        "question '{}' depends on unknown question '{}'",
                        question.id, dep
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions of one stage, in catalogue order
    pub fn stage_questions(&self, stage: Stage) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.stage == stage)
    }

    /// Resolve an option value to its display label.
    ///
    /// Unknown questions, non-choice questions and unmatched values pass the
    /// raw value through unchanged.
    pub fn label_for(&self, question_id: &str, value: &str) -> String {
        self.question(question_id)
            .and_then(|q| q.option(value))
            .map(|o| o.label.clone())
            .unwrap_or_else(|| value.to_string())
    }

    pub fn stage_info(&self, stage: Stage) -> StageInfo {
        builtin::stage_info(stage)
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}
