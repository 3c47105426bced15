//! @acp:module "Blueprint Compiler"
//! @acp:summary "Pure transformation of wizard answers into a course blueprint"
//! @acp:domain blueprint
//! @acp:layer core
//!
//! The compiler is total: any answer set produces a complete blueprint.
//! Required answers are the wizard's concern; missing optional answers get
//! fixed fallback strings here.

use crate::answers::AnswerSet;
use crate::catalogue::Catalogue;
use crate::uploads::Attachments;

use super::activities::activities_for_strategy;
use super::duration::{allocate_module_duration, parse_duration_hours};
use super::roles::{DepthTier, ModuleRole};
use super::{Blueprint, CourseModule, UploadedDocuments};

/// Prefix of every derived course title
pub const TITLE_PREFIX: &str = "Course: ";

/// Words of the transfer objective kept in the title
pub const TITLE_WORD_LIMIT: usize = 8;

/// Shown when a custom duration was chosen but left blank
pub const CUSTOM_DURATION_FALLBACK: &str = "To be defined";

pub const NO_EXCLUSIONS_FALLBACK: &str = "No exclusions specified";

pub const NO_DOCUMENTS_FALLBACK: &str = "No documents specified";

/// Sentinel value of the duration choice that activates the free-text follow-up
pub const CUSTOM_DURATION: &str = "custom";

/// @acp:summary "Compiles answer sets against an injected question catalogue"
#[derive(Debug, Clone, Copy)]
pub struct BlueprintCompiler<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> BlueprintCompiler<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    /// @acp:summary "Compile answers into a blueprint"
    pub fn compile(&self, answers: &AnswerSet) -> Blueprint {
        let label = |id: &str| self.catalogue.label_for(id, &answers.scalar(id));
        let or_fallback = |id: &str, fallback: &str| {
            let value = answers.scalar(id);
            if value.is_empty() {
                fallback.to_string()
            } else {
                value
            }
        };

        Blueprint {
            title: derive_title(&answers.scalar("transfer_objective")),
            transfer_objective: answers.scalar("transfer_objective"),
            business_objective: answers.scalar("business_objective"),
            depth_level: label("depth_level"),
            assessment_methods: answers
                .array("assessment_methods")
                .iter()
                .map(|v| self.catalogue.label_for("assessment_methods", v))
                .collect(),
            short_term_kpi: answers.scalar("kpi_short"),
            long_term_kpi: answers.scalar("kpi_long"),
            learner_profile: answers.scalar("learner_profile"),
            resistance_reasons: answers.scalar("resistance"),
            scenarios: answers.scalar("scenarios"),
            excluded_content: or_fallback("excluded_content", NO_EXCLUSIONS_FALLBACK),
            included_references: or_fallback("included_references", NO_DOCUMENTS_FALLBACK),
            cited_references: or_fallback("cited_references", NO_DOCUMENTS_FALLBACK),
            duration: self.resolve_duration(answers),
            tone_of_voice: label("tone"),
            teaching_strategy: label("teaching_strategy"),
            modules: build_modules(answers),
            uploaded_documents: None,
        }
    }

    /// Compile and attach uploaded documents verbatim.
    ///
    /// Upload questions come first in catalogue order, then any other
    /// question ids in id order.
    pub fn compile_with_attachments(
        &self,
        answers: &AnswerSet,
        attachments: &Attachments,
    ) -> Blueprint {
        let mut blueprint = self.compile(answers);
        if attachments.is_empty() {
            return blueprint;
        }

        let mut documents: Vec<UploadedDocuments> = self
            .catalogue
            .questions()
            .iter()
            .filter_map(|q| {
                let files = attachments.files(&q.id);
                (!files.is_empty()).then(|| UploadedDocuments {
                    question_id: q.id.clone(),
                    files: files.to_vec(),
                })
            })
            .collect();

        for (question_id, files) in attachments.iter() {
            if self.catalogue.question(question_id).is_none() {
                documents.push(UploadedDocuments {
                    question_id: question_id.clone(),
                    files: files.clone(),
                });
            }
        }

        blueprint.uploaded_documents = Some(documents);
        blueprint
    }

    /// Display duration: the custom text (or placeholder) when the sentinel
    /// was chosen, else the choice label
    fn resolve_duration(&self, answers: &AnswerSet) -> String {
        let choice = answers.scalar("duration");
        if choice == CUSTOM_DURATION {
            let custom = answers.scalar("duration_custom");
            if custom.is_empty() {
                CUSTOM_DURATION_FALLBACK.to_string()
            } else {
                custom
            }
        } else {
            self.catalogue.label_for("duration", &choice)
        }
    }
}

/// `Course: ` plus the first eight words of the transfer objective, with an
/// ellipsis when words were dropped
pub fn derive_title(transfer_objective: &str) -> String {
    let words: Vec<&str> = transfer_objective.split_whitespace().collect();
    let kept = words
        .iter()
        .take(TITLE_WORD_LIMIT)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let ellipsis = if words.len() > TITLE_WORD_LIMIT { "..." } else { "" };
    format!("{}{}{}", TITLE_PREFIX, kept, ellipsis)
}

/// Raw duration used for hour parsing (option value or custom text)
fn total_duration_source(answers: &AnswerSet) -> String {
    let choice = answers.scalar("duration");
    if choice == CUSTOM_DURATION {
        answers.scalar("duration_custom")
    } else {
        choice
    }
}

fn build_modules(answers: &AnswerSet) -> Vec<CourseModule> {
    let tier = DepthTier::from_answer(&answers.scalar("depth_level"));
    let total_duration = total_duration_source(answers);
    let strategy = answers.scalar("teaching_strategy");
    let assessments = answers.array("assessment_methods");

    tracing::debug!(
        "Compiling {:?} tier course, {} total hours, strategy '{}'",
        tier,
        parse_duration_hours(&total_duration),
        strategy
    );

    tier.roles()
        .into_iter()
        .enumerate()
        .map(|(position, role)| CourseModule {
            number: position as u32 + 1,
            title: role.title().to_string(),
            objective: role.objective().to_string(),
            duration: allocate_module_duration(&total_duration, role),
            activities: module_activities(role, &strategy),
            assessment: role.assessment(&assessments).to_string(),
        })
        .collect()
}

fn module_activities(role: ModuleRole, strategy: &str) -> Vec<String> {
    match role.phase() {
        Some(phase) => activities_for_strategy(strategy, phase),
        None => role
            .fixed_activities()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}
