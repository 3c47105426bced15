//! @acp:module "Rendering"
//! @acp:summary "Text, Markdown and JSON views of blueprints"
//! @acp:domain cli
//! @acp:layer presentation

use std::str::FromStr;

use console::style;

use crate::blueprint::Blueprint;
use crate::enrich::EnrichedBlueprint;
use crate::error::{Result, SophiaError};
use crate::uploads::format_file_size;

/// Output format for blueprint views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Styled terminal output
    #[default]
    Text,
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = SophiaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(SophiaError::Other(format!(
                "Unknown format '{}'. Use text, markdown or json",
                other
            ))),
        }
    }
}

/// Render a compiled blueprint
pub fn render_blueprint(blueprint: &Blueprint, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => blueprint.to_json_pretty(),
        OutputFormat::Markdown => Ok(blueprint_markdown(blueprint)),
        OutputFormat::Text => Ok(blueprint_text(blueprint)),
    }
}

/// Render an enriched blueprint
pub fn render_enriched(enriched: &EnrichedBlueprint, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => enriched.to_json_pretty(),
        OutputFormat::Markdown => Ok(enriched_markdown(enriched)),
        OutputFormat::Text => Ok(enriched_text(enriched)),
    }
}

/// (label, value) pairs of the questionnaire summary, in display order
fn summary_fields(b: &Blueprint) -> Vec<(&'static str, String)> {
    vec![
        ("Transfer objective", b.transfer_objective.clone()),
        ("Business objective", b.business_objective.clone()),
        ("Depth level", b.depth_level.clone()),
        ("Assessment methods", b.assessment_methods.join(", ")),
        ("Short-term KPI", b.short_term_kpi.clone()),
        ("Long-term KPI", b.long_term_kpi.clone()),
        ("Learner profile", b.learner_profile.clone()),
        ("Expected resistance", b.resistance_reasons.clone()),
        ("Real scenarios", b.scenarios.clone()),
        ("Excluded content", b.excluded_content.clone()),
        ("Included documents", b.included_references.clone()),
        ("Documents to cite", b.cited_references.clone()),
        ("Duration", b.duration.clone()),
        ("Tone of voice", b.tone_of_voice.clone()),
        ("Teaching strategy", b.teaching_strategy.clone()),
    ]
}

fn blueprint_text(b: &Blueprint) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", style(&b.title).bold().cyan()));
    out.push('\n');

    for (label, value) in summary_fields(b) {
        out.push_str(&format!("  {:<22} {}\n", style(format!("{}:", label)).dim(), value));
    }

    out.push('\n');
    out.push_str(&format!("{}\n", style("Modules").bold()));
    for module in &b.modules {
        out.push('\n');
        out.push_str(&format!(
            "  {} {} {}\n",
            style(format!("{}.", module.number)).cyan(),
            style(&module.title).bold(),
            style(format!("({})", module.duration)).dim()
        ));
        out.push_str(&format!("     {}\n", module.objective));
        for activity in &module.activities {
            out.push_str(&format!("     {} {}\n", style("•").dim(), activity));
        }
        out.push_str(&format!("     {} {}\n", style("Assessment:").yellow(), module.assessment));
    }

    if let Some(documents) = &b.uploaded_documents {
        out.push('\n');
        out.push_str(&format!("{}\n", style("Uploaded documents").bold()));
        for group in documents {
            for file in &group.files {
                out.push_str(&format!(
                    "  {} {} {} {}\n",
                    style("📎").dim(),
                    file.name,
                    style(format!("({})", format_file_size(file.size))).dim(),
                    style(format!("[{}]", group.question_id)).dim()
                ));
            }
        }
    }

    out
}

fn blueprint_markdown(b: &Blueprint) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n", b.title));
    out.push('\n');
    out.push_str("## Summary\n");
    out.push('\n');
    for (label, value) in summary_fields(b) {
        out.push_str(&format!("- **{}:** {}\n", label, value));
    }

    out.push('\n');
    out.push_str("## Modules\n");
    for module in &b.modules {
        out.push('\n');
        out.push_str(&format!(
            "### Module {}: {} ({})\n",
            module.number, module.title, module.duration
        ));
        out.push('\n');
        out.push_str(&format!("**Objective:** {}\n", module.objective));
        out.push('\n');
        out.push_str("**Activities:**\n");
        out.push('\n');
        for activity in &module.activities {
            out.push_str(&format!("- {}\n", activity));
        }
        out.push('\n');
        out.push_str(&format!("**Assessment:** {}\n", module.assessment));
    }

    let names = b.uploaded_file_names();
    if !names.is_empty() {
        out.push('\n');
        out.push_str("## Uploaded documents\n");
        out.push('\n');
        for name in names {
            out.push_str(&format!("- {}\n", name));
        }
    }

    out
}

fn enriched_text(e: &EnrichedBlueprint) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", style("✨").yellow(), style(&e.title).bold().cyan()));

    for module in &e.modules {
        out.push('\n');
        out.push_str(&format!(
            "{} {} {}\n",
            style(format!("Module {}:", module.number)).cyan(),
            style(&module.title).bold(),
            style(format!("({})", module.duration)).dim()
        ));
        out.push_str(&format!("  {} {}\n", style("Objective:").dim(), module.objective));
        if !module.content.is_empty() {
            out.push('\n');
            for paragraph in module.content.split("\n\n") {
                out.push_str(&format!("  {}\n", paragraph.trim()));
                out.push('\n');
            }
        }
        for activity in &module.activities {
            out.push_str(&format!("  {} {}\n", style("•").dim(), activity));
        }
        out.push_str(&format!("  {} {}\n", style("Assessment:").yellow(), module.assessment));
        if !module.speaker_notes.is_empty() {
            out.push_str(&format!(
                "  {} {}\n",
                style("Speaker notes:").magenta(),
                module.speaker_notes
            ));
        }
    }

    out
}

fn enriched_markdown(e: &EnrichedBlueprint) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n", e.title));
    out.push('\n');
    out.push_str(&format!("_Based on: {}_\n", e.blueprint.title));

    for module in &e.modules {
        out.push('\n');
        out.push_str(&format!(
            "## Module {}: {} ({})\n",
            module.number, module.title, module.duration
        ));
        out.push('\n');
        out.push_str(&format!("**Objective:** {}\n", module.objective));
        if !module.content.is_empty() {
            out.push('\n');
            out.push_str(&format!("{}\n", module.content.trim()));
        }
        out.push('\n');
        out.push_str("### Activities\n");
        out.push('\n');
        for activity in &module.activities {
            out.push_str(&format!("- {}\n", activity));
        }
        out.push('\n');
        out.push_str("### Assessment\n");
        out.push('\n');
        out.push_str(&format!("{}\n", module.assessment));
        if !module.speaker_notes.is_empty() {
            out.push('\n');
            out.push_str(&format!("> **Speaker notes:** {}\n", module.speaker_notes));
        }
    }

    out
}
