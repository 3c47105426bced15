//! @acp:module "Compile Command"
//! @acp:summary "Compile an answers file into a blueprint without the interactive wizard"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use console::style;

use crate::answers::AnswerSet;
use crate::blueprint::BlueprintCompiler;
use crate::catalogue::Catalogue;
use crate::render::{render_blueprint, OutputFormat};
use crate::uploads::{ingest_file, Attachments};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Answers file (.json, .yaml or .yml)
    pub answers: PathBuf,
    pub format: OutputFormat,
    /// Write the result here instead of stdout
    pub output: Option<PathBuf>,
    /// (question id, file) pairs to attach
    pub attach: Vec<(String, PathBuf)>,
}

/// Parse a `QUESTION_ID=PATH` attachment argument
pub fn parse_attachment(arg: &str) -> std::result::Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((id, path)) if !id.trim().is_empty() && !path.trim().is_empty() => {
            Ok((id.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(format!("expected QUESTION_ID=PATH, got '{}'", arg)),
    }
}

/// Execute the compile command
pub fn execute_compile(options: CompileOptions) -> Result<()> {
    let catalogue = Catalogue::builtin();
    let answers = AnswerSet::load(&options.answers)
        .with_context(|| format!("Failed to load answers from {}", options.answers.display()))?;

    for question in missing_required(&catalogue, &answers) {
        tracing::warn!("Required question '{}' has no answer", question);
    }

    let mut attachments = Attachments::new();
    for (question_id, path) in &options.attach {
        let accepts = catalogue
            .question(question_id)
            .map(|q| q.question_type.accepts_uploads())
            .unwrap_or(false);
        if !accepts {
            bail!("Question '{}' does not accept uploads", question_id);
        }
        let file = ingest_file(path)
            .with_context(|| format!("Failed to attach {}", path.display()))?;
        attachments.attach(question_id.as_str(), file);
    }

    let blueprint =
        BlueprintCompiler::new(&catalogue).compile_with_attachments(&answers, &attachments);
    let rendered = render_blueprint(&blueprint, options.format)?;

    match options.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Compiled {} modules to {}",
                style("✓").green(),
                blueprint.modules.len(),
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Ids of active required questions without a non-blank answer
pub fn missing_required<'a>(catalogue: &'a Catalogue, answers: &AnswerSet) -> Vec<&'a str> {
    catalogue
        .questions()
        .iter()
        .filter(|q| q.required && q.activation.is_active(answers))
        .filter(|q| !answers.is_answered(&q.id))
        .map(|q| q.id.as_str())
        .collect()
}
