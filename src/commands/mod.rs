//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod compile;
pub mod design;
pub mod enrich;
pub mod questions;
pub mod validate;

pub use compile::{execute_compile, parse_attachment, CompileOptions};
pub use design::{execute_design, DesignOptions};
pub use enrich::{execute_enrich, run_enrichment, EnrichOptions};
pub use questions::{execute_questions, QuestionsOptions};
pub use validate::{execute_validate, ValidateOptions};
