//! @acp:module "Blueprint"
//! @acp:summary "Course blueprint document and its deterministic compiler"
//! @acp:domain blueprint
//! @acp:layer core
//!
//! # Blueprint
//!
//! A [`Blueprint`] is the structured curriculum document compiled from the
//! wizard's answers. It is immutable once produced and serializes verbatim
//! (camelCase JSON) for export.
//!
//! ## Core Components
//!
//! - [`BlueprintCompiler`]: pure `answers -> Blueprint` transformation
//! - [`DepthTier`] / [`ModuleRole`]: which modules exist and how they are weighted
//! - [`duration`]: total-hours parsing and per-module allocation
//! - [`activities`]: strategy-indexed activity table

pub mod activities;
pub mod compiler;
pub mod duration;
pub mod roles;

pub use activities::{activities_for_strategy, Phase};
pub use compiler::{
    BlueprintCompiler, CUSTOM_DURATION_FALLBACK, NO_DOCUMENTS_FALLBACK, NO_EXCLUSIONS_FALLBACK,
    TITLE_PREFIX,
};
pub use duration::{allocate_module_duration, format_hours, parse_duration_hours};
pub use roles::{DepthTier, ModuleRole};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::uploads::UploadedFile;

/// Default export file name
pub const DEFAULT_EXPORT_PATH: &str = "course-blueprint.json";

/// One curriculum unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    /// 1-based position after conditional inclusion
    pub number: u32,
    pub title: String,
    pub objective: String,
    pub duration: String,
    pub activities: Vec<String>,
    pub assessment: String,
}

/// Files attached to one upload question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocuments {
    pub question_id: String,
    pub files: Vec<UploadedFile>,
}

/// @acp:summary "Compiled course blueprint"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub title: String,
    pub transfer_objective: String,
    pub business_objective: String,
    pub depth_level: String,
    pub assessment_methods: Vec<String>,
    #[serde(rename = "shortTermKPI")]
    pub short_term_kpi: String,
    #[serde(rename = "longTermKPI")]
    pub long_term_kpi: String,
    pub learner_profile: String,
    pub resistance_reasons: String,
    pub scenarios: String,
    pub excluded_content: String,
    pub included_references: String,
    pub cited_references: String,
    pub duration: String,
    pub tone_of_voice: String,
    pub teaching_strategy: String,
    pub modules: Vec<CourseModule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_documents: Option<Vec<UploadedDocuments>>,
}

impl Blueprint {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// @acp:summary "Load a blueprint from an exported JSON file"
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// @acp:summary "Export the blueprint as pretty JSON"
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Names of every uploaded file, in attachment order
    pub fn uploaded_file_names(&self) -> Vec<&str> {
        self.uploaded_documents
            .iter()
            .flatten()
            .flat_map(|d| d.files.iter().map(|f| f.name.as_str()))
            .collect()
    }

    pub fn module(&self, number: u32) -> Option<&CourseModule> {
        self.modules.iter().find(|m| m.number == number)
    }
}
