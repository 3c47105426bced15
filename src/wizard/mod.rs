//! @acp:module "Wizard"
//! @acp:summary "Questionnaire state machine: phases, stage navigation and presence checks"
//! @acp:domain wizard
//! @acp:layer logic
//!
//! # Wizard
//!
//! The wizard walks the catalogue stage by stage. It performs no I/O; a
//! front end (the `design` command) drives it and renders each step.
//!
//! ```text
//! Welcome -> StageIntro(1) -> Questions ... -> StageIntro(2) -> ... -> Complete
//! ```

use crate::answers::{AnswerSet, AnswerValue};
use crate::blueprint::{Blueprint, BlueprintCompiler};
use crate::catalogue::{Catalogue, Question, QuestionType, Stage};
use crate::error::{Result, SophiaError};
use crate::uploads::{Attachments, UploadedFile};

/// Where the wizard currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Welcome,
    StageIntro,
    Questions,
    Complete,
}

/// Result of a forward move
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Showing the introduction of a stage
    StageIntro(Stage),
    /// Showing the question with this id
    Question(String),
    /// The current question still needs an answer
    Blocked,
    /// All stages done; the compiled blueprint
    Complete(Box<Blueprint>),
}

/// @acp:summary "Drives a single questionnaire session"
#[derive(Debug, Clone)]
pub struct Wizard<'a> {
    catalogue: &'a Catalogue,
    phase: WizardPhase,
    stage: Stage,
    index: usize,
    answers: AnswerSet,
    attachments: Attachments,
}

impl<'a> Wizard<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self {
            catalogue,
            phase: WizardPhase::Welcome,
            stage: Stage::One,
            index: 0,
            answers: AnswerSet::new(),
            attachments: Attachments::new(),
        }
    }

    /// Resume with previously collected answers, still at the welcome screen
    pub fn with_answers(catalogue: &'a Catalogue, answers: AnswerSet) -> Self {
        Self {
            answers,
            ..Self::new(catalogue)
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Position within the active questions of the current stage
    pub fn question_index(&self) -> usize {
        self.index
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    pub fn catalogue(&self) -> &Catalogue {
        self.catalogue
    }

    /// Every question whose activation holds against the current answers
    pub fn active_questions(&self) -> Vec<&'a Question> {
        self.catalogue
            .questions()
            .iter()
            .filter(|q| q.activation.is_active(&self.answers))
            .collect()
    }

    /// Active questions of one stage, in catalogue order
    pub fn stage_questions(&self, stage: Stage) -> Vec<&'a Question> {
        self.catalogue
            .stage_questions(stage)
            .filter(|q| q.activation.is_active(&self.answers))
            .collect()
    }

    /// The question on screen, if the wizard is in the question phase
    pub fn current_question(&self) -> Option<&'a Question> {
        if self.phase != WizardPhase::Questions {
            return None;
        }
        let questions = self.stage_questions(self.stage);
        let last = questions.len().checked_sub(1)?;
        questions.get(self.index.min(last)).copied()
    }

    /// Leave the welcome screen for the first stage introduction
    pub fn start(&mut self) -> Step {
        self.phase = WizardPhase::StageIntro;
        self.stage = Stage::One;
        self.index = 0;
        Step::StageIntro(self.stage)
    }

    /// Leave a stage introduction for its first question
    pub fn begin_stage(&mut self) -> Step {
        self.phase = WizardPhase::Questions;
        self.index = 0;
        self.current_step()
    }

    /// Record an answer, replacing any previous one
    pub fn answer(&mut self, question_id: &str, value: AnswerValue) -> Result<()> {
        let question = self.known_question(question_id)?;
        let value = match (question.question_type, value) {
            // Multi-choice answers stay array-valued
            (QuestionType::MultiChoice, AnswerValue::Single(s)) => AnswerValue::Multi(vec![s]),
            (_, value) => value,
        };
        self.answers.set(question_id, value);
        Ok(())
    }

    /// Flip one selection of a multi-choice question
    pub fn toggle(&mut self, question_id: &str, value: &str) -> Result<()> {
        let question = self.known_question(question_id)?;
        if question.question_type != QuestionType::MultiChoice {
            return Err(SophiaError::Other(format!(
                "Question '{}' is not multi-choice",
                question_id
            )));
        }
        self.answers.toggle(question_id, value);
        Ok(())
    }

    pub fn attach(&mut self, question_id: &str, file: UploadedFile) -> Result<()> {
        let question = self.known_question(question_id)?;
        if !question.question_type.accepts_uploads() {
            return Err(SophiaError::Other(format!(
                "Question '{}' does not accept uploads",
                question_id
            )));
        }
        self.attachments.attach(question_id, file);
        Ok(())
    }

    pub fn detach(&mut self, question_id: &str, index: usize) -> Option<UploadedFile> {
        self.attachments.detach(question_id, index)
    }

    /// Presence check for the current question.
    ///
    /// Optional questions always pass; otherwise the answer must be non-blank
    /// (a non-empty selection for multi-choice).
    pub fn can_advance(&self) -> bool {
        match self.current_question() {
            Some(question) => {
                !question.required
                    || self
                        .answers
                        .get(&question.id)
                        .map(|value| !value.is_blank())
                        .unwrap_or(false)
            }
            None => self.phase != WizardPhase::Questions,
        }
    }

    /// Move forward from wherever the wizard is
    pub fn next(&mut self) -> Step {
        match self.phase {
            WizardPhase::Welcome => self.start(),
            WizardPhase::StageIntro => self.begin_stage(),
            WizardPhase::Complete => Step::Complete(Box::new(self.compile())),
            WizardPhase::Questions => {
                if !self.can_advance() {
                    return Step::Blocked;
                }
                let count = self.stage_questions(self.stage).len();
                if self.index + 1 < count {
                    self.index += 1;
                    return self.current_step();
                }
                match self.stage.next() {
                    Some(stage) => {
                        self.stage = stage;
                        self.index = 0;
                        self.phase = WizardPhase::StageIntro;
                        Step::StageIntro(stage)
                    }
                    None => {
                        self.phase = WizardPhase::Complete;
                        let blueprint = self.compile();
                        tracing::debug!("Wizard complete: {} modules", blueprint.modules.len());
                        Step::Complete(Box::new(blueprint))
                    }
                }
            }
        }
    }

    pub fn can_go_back(&self) -> bool {
        match self.phase {
            WizardPhase::Welcome => false,
            WizardPhase::StageIntro | WizardPhase::Questions => {
                self.index > 0 || self.stage.previous().is_some()
            }
            WizardPhase::Complete => true,
        }
    }

    /// Step back one question, crossing into the last active question of
    /// the previous stage when at the start of a stage.
    ///
    /// Returns the question now shown, or `None` when already at the start.
    pub fn back(&mut self) -> Option<&'a Question> {
        match self.phase {
            WizardPhase::Welcome => return None,
            WizardPhase::Complete => {
                self.phase = WizardPhase::Questions;
                self.index = self.stage_questions(self.stage).len().saturating_sub(1);
                return self.current_question();
            }
            WizardPhase::StageIntro | WizardPhase::Questions => {}
        }

        if self.phase == WizardPhase::Questions && self.index > 0 {
            self.index -= 1;
        } else {
            let previous = self.stage.previous()?;
            self.stage = previous;
            self.index = self.stage_questions(previous).len().saturating_sub(1);
        }
        self.phase = WizardPhase::Questions;
        self.current_question()
    }

    /// True when the current question is the last one of the last stage
    pub fn is_last_question(&self) -> bool {
        self.phase == WizardPhase::Questions
            && self.stage.next().is_none()
            && self.index + 1 >= self.stage_questions(self.stage).len()
    }

    /// Clear all answers and uploads and return to the welcome screen
    pub fn restart(&mut self) {
        self.phase = WizardPhase::Welcome;
        self.stage = Stage::One;
        self.index = 0;
        self.answers = AnswerSet::new();
        self.attachments.clear();
    }

    /// Overall completion: each stage is a third, split evenly across its
    /// active questions
    pub fn progress_percent(&self) -> f64 {
        match self.phase {
            WizardPhase::Welcome => 0.0,
            WizardPhase::Complete => 100.0,
            WizardPhase::StageIntro | WizardPhase::Questions => {
                let stage_share = 100.0 / Stage::all().len() as f64;
                let base = (self.stage.number() - 1) as f64 * stage_share;
                let count = self.stage_questions(self.stage).len();
                if count == 0 {
                    base
                } else {
                    base + (self.index as f64 / count as f64) * stage_share
                }
            }
        }
    }

    /// Compile the answers collected so far
    pub fn compile(&self) -> Blueprint {
        BlueprintCompiler::new(self.catalogue)
            .compile_with_attachments(&self.answers, &self.attachments)
    }

    fn current_step(&self) -> Step {
        match self.current_question() {
            Some(question) => Step::Question(question.id.clone()),
            None => Step::Blocked,
        }
    }

    fn known_question(&self, question_id: &str) -> Result<&'a Question> {
        self.catalogue
            .question(question_id)
            .ok_or_else(|| SophiaError::UnknownQuestion(question_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_welcome() {
        let catalogue = Catalogue::builtin();
        let wizard = Wizard::new(&catalogue);
        assert_eq!(wizard.phase(), WizardPhase::Welcome);
        assert_eq!(wizard.progress_percent(), 0.0);
        assert!(wizard.current_question().is_none());
        assert!(!wizard.can_go_back());
    }

    #[test]
    fn test_single_answer_to_multi_choice_is_wrapped() {
        let catalogue = Catalogue::builtin();
        let mut wizard = Wizard::new(&catalogue);
        wizard
            .answer("assessment_methods", AnswerValue::single("quiz"))
            .unwrap();
        assert_eq!(
            wizard.answers().get("assessment_methods"),
            Some(&AnswerValue::multi(["quiz"]))
        );
    }

    #[test]
    fn test_rejects_unknown_question() {
        let catalogue = Catalogue::builtin();
        let mut wizard = Wizard::new(&catalogue);
        assert!(matches!(
            wizard.answer("favourite_colour", AnswerValue::single("blue")),
            Err(SophiaError::UnknownQuestion(_))
        ));
        assert!(wizard.toggle("tone", "formal").is_err());
    }
}
