//! @acp:module "Enrich Command"
//! @acp:summary "Expand an exported blueprint with AI-generated course content"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `sophia enrich` and the spinner-wrapped call shared with
//! `sophia design`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::blueprint::Blueprint;
use crate::config::EnrichConfig;
use crate::enrich::{EnrichError, EnrichedBlueprint, Enricher};
use crate::render::{render_enriched, OutputFormat};
use crate::schema::{self, SchemaKind};

/// Options for the enrich command
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Exported blueprint JSON
    pub blueprint: PathBuf,
    /// Write the result here instead of stdout
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Execute the enrich command
pub fn execute_enrich(options: EnrichOptions, config: &EnrichConfig) -> Result<()> {
    let content = std::fs::read_to_string(&options.blueprint)
        .with_context(|| format!("Failed to read {}", options.blueprint.display()))?;
    schema::validate_str(&content, SchemaKind::Blueprint)?;
    let blueprint = Blueprint::from_json_str(&content)?;

    // run_enrichment has already printed the failure
    let Ok(enriched) = run_enrichment(config, &blueprint) else {
        std::process::exit(1);
    };
    let rendered = render_enriched(&enriched, options.format)?;

    match options.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Wrote {}", style("✓").green(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Run the enrichment call behind a spinner.
///
/// Every failure, including a missing API key, is printed once here before
/// it is returned.
pub fn run_enrichment(config: &EnrichConfig, blueprint: &Blueprint) -> Result<EnrichedBlueprint> {
    match enrich_with_spinner(config, blueprint) {
        Ok(enriched) => {
            println!(
                "{} Generated content for {} modules",
                style("✓").green(),
                enriched.modules.len()
            );
            Ok(enriched)
        }
        Err(e) => {
            eprintln!("{}", failure_line(&e));
            Err(e.into())
        }
    }
}

fn enrich_with_spinner(
    config: &EnrichConfig,
    blueprint: &Blueprint,
) -> std::result::Result<EnrichedBlueprint, EnrichError> {
    // Key problems surface before the spinner starts
    let enricher = Enricher::from_env(config.clone())?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(format!("Generating detailed content with {}...", config.model));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = enricher.enrich_blueprint(blueprint);
    spinner.finish_and_clear();
    result
}

fn failure_line(error: &EnrichError) -> String {
    format!("{} {}", style("✗").red(), error)
}
