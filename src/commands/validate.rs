//! @acp:module "Validate Command"
//! @acp:summary "Validate exported blueprints and AI replies against schemas"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::schema;

/// Options for the validate command
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// File to validate
    pub file: PathBuf,
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions) -> Result<()> {
    let content = std::fs::read_to_string(&options.file)
        .with_context(|| format!("Failed to read {}", options.file.display()))?;

    match schema::validate_detected(&content) {
        Ok(kind) => {
            println!(
                "{} {} is a valid {} document",
                style("✓").green(),
                options.file.display(),
                kind
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            std::process::exit(1);
        }
    }
}
