#![forbid(unsafe_code)]

//! @acp:module "Sophia Library"
//! @acp:summary "Backward-design questionnaire that compiles course blueprints"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # Sophia - Course Design Studio
//!
//! Collects answers to a three-stage backward-design questionnaire and
//! compiles them into a structured course blueprint.
//!
//! ## Features
//!
//! - **Deterministic compiler**: same answers, same blueprint
//! - **Depth-driven curriculum**: three to five modules with weighted durations
//! - **Optional AI enrichment**: one schema-checked chat-completion call
//! - **JSON export**: camelCase blueprint documents with a published schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use sophia::{AnswerSet, AnswerValue, BlueprintCompiler, Catalogue};
//!
//! fn main() -> sophia::Result<()> {
//!     let catalogue = Catalogue::builtin();
//!
//!     let mut answers = AnswerSet::new();
//!     answers.set("transfer_objective", AnswerValue::single("Run better one-to-ones"));
//!     answers.set("depth_level", AnswerValue::single("apply"));
//!
//!     let blueprint = BlueprintCompiler::new(&catalogue).compile(&answers);
//!     blueprint.write_json("course-blueprint.json")?;
//!
//!     Ok(())
//! }
//! ```

pub mod answers;
pub mod blueprint;
pub mod catalogue;
pub mod commands;
pub mod config;
pub mod enrich;
pub mod error;
pub mod render;
pub mod schema;
pub mod uploads;
pub mod wizard;

// Re-exports
pub use answers::{AnswerSet, AnswerValue};
pub use blueprint::{Blueprint, BlueprintCompiler, CourseModule, DepthTier, ModuleRole};
pub use catalogue::{Catalogue, Question, QuestionType, Stage};
pub use config::Config;
pub use enrich::{AiGeneratedContent, EnrichError, EnrichedBlueprint, Enricher};
pub use error::{Result, SophiaError};
pub use uploads::{Attachments, UploadedFile};
pub use wizard::{Step, Wizard, WizardPhase};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
