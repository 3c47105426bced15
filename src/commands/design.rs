//! @acp:module "Design Command"
//! @acp:summary "Interactive backward-design questionnaire"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `sophia design`: a terminal front end over [`Wizard`]. Text
//! answers accept `:back` to return to the previous question; choice prompts
//! offer a back entry.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::answers::{AnswerSet, AnswerValue};
use crate::blueprint::Blueprint;
use crate::catalogue::{Catalogue, Question, QuestionType, Stage};
use crate::config::Config;
use crate::render::{render_blueprint, render_enriched, OutputFormat};
use crate::uploads::{format_file_size, ingest_file};
use crate::wizard::{Step, Wizard};

use super::enrich::run_enrichment;

/// Typed into a text prompt to go back one question
const BACK_COMMAND: &str = ":back";

const BACK_ITEM: &str = "← Back";

/// Options for the design command
#[derive(Debug, Clone, Default)]
pub struct DesignOptions {
    /// Prefill answers from a file
    pub answers: Option<PathBuf>,
    /// Export the blueprint JSON here (skips the export prompt)
    pub export: Option<PathBuf>,
    /// Also export Markdown here
    pub markdown: Option<PathBuf>,
    /// Run AI enrichment without asking
    pub enrich: bool,
    /// Save the collected answers for later `sophia compile` runs
    pub save_answers: Option<PathBuf>,
}

/// What the user asked for at a prompt
enum Navigation {
    Forward,
    Back,
}

/// Execute the design command
pub fn execute_design(options: DesignOptions, config: &Config) -> Result<()> {
    let catalogue = Catalogue::builtin();
    let prefill = match &options.answers {
        Some(path) => AnswerSet::load(path)?,
        None => AnswerSet::new(),
    };
    let mut wizard = Wizard::with_answers(&catalogue, prefill);

    loop {
        print_welcome();
        let blueprint = run_questionnaire(&mut wizard)?;

        if let Some(path) = &options.save_answers {
            wizard.answers().write_json(path)?;
            println!("{} Saved answers to {}", style("✓").green(), path.display());
        }

        println!();
        print!("{}", render_blueprint(&blueprint, OutputFormat::Text)?);
        export_blueprint(&blueprint, &options, config)?;
        maybe_enrich(&blueprint, &options, config)?;

        let again = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Design another course?")
            .default(false)
            .interact()?;
        if !again {
            break;
        }
        wizard.restart();
    }

    Ok(())
}

fn print_welcome() {
    println!(
        "\n{} {}",
        style("✦").cyan(),
        style("Sophia Course Design Studio").bold()
    );
    println!(
        "  {}",
        style("Backward design in three stages: desired results, evidence, learning experience.")
            .dim()
    );
    println!(
        "  {}",
        style(format!("Type {} in a text answer to go back.", BACK_COMMAND)).dim()
    );
}

fn print_stage_intro(catalogue: &Catalogue, stage: Stage) {
    let info = catalogue.stage_info(stage);
    println!(
        "\n{} {} {}",
        info.icon,
        style(format!("Stage {} of {}:", stage, Stage::all().len())).bold(),
        style(info.title).bold().cyan()
    );
    println!("  {}\n", style(info.description).dim());
}

/// Drive the wizard to completion
fn run_questionnaire(wizard: &mut Wizard<'_>) -> Result<Blueprint> {
    let mut step = wizard.start();

    loop {
        match step {
            Step::StageIntro(stage) => {
                print_stage_intro(wizard.catalogue(), stage);
                step = wizard.begin_stage();
            }
            Step::Question(_) | Step::Blocked => {
                let Some(question) = wizard.current_question() else {
                    step = wizard.next();
                    continue;
                };
                if matches!(step, Step::Blocked) {
                    println!("{} This question needs an answer", style("⚠").yellow());
                }
                match ask(wizard, question)? {
                    Navigation::Forward => step = wizard.next(),
                    Navigation::Back => {
                        if wizard.back().is_none() {
                            println!("{} Already at the first question", style("→").dim());
                        }
                        step = match wizard.current_question() {
                            Some(q) => Step::Question(q.id.clone()),
                            None => wizard.next(),
                        };
                    }
                }
            }
            Step::Complete(blueprint) => {
                println!("\n{} All stages complete", style("✓").green());
                return Ok(*blueprint);
            }
        }
    }
}

fn print_question_header(wizard: &Wizard<'_>, question: &Question) {
    let total = wizard.stage_questions(wizard.stage()).len();
    println!(
        "{} {}",
        style(format!("[{:>3.0}%]", wizard.progress_percent())).dim(),
        style(format!(
            "Stage {} · Question {}/{}{}",
            wizard.stage(),
            wizard.question_index() + 1,
            total,
            if question.required { "" } else { " (optional)" }
        ))
        .dim()
    );
    println!("{}", style(&question.explanation).dim());
}

fn ask(wizard: &mut Wizard<'_>, question: &Question) -> Result<Navigation> {
    print_question_header(wizard, question);
    match question.question_type {
        QuestionType::Text | QuestionType::Textarea | QuestionType::TextareaWithUpload => {
            ask_text(wizard, question)
        }
        QuestionType::SingleChoice => ask_single(wizard, question),
        QuestionType::MultiChoice => ask_multi(wizard, question),
    }
}

fn ask_text(wizard: &mut Wizard<'_>, question: &Question) -> Result<Navigation> {
    let theme = ColorfulTheme::default();
    let previous = wizard.answers().scalar(&question.id);
    let mut prompt = Input::<String>::with_theme(&theme)
        .with_prompt(&question.text)
        .allow_empty(true);
    if !previous.is_empty() {
        prompt = prompt.with_initial_text(previous);
    } else if let Some(placeholder) = &question.placeholder {
        println!("  {}", style(format!("e.g. {}", placeholder)).dim().italic());
    }
    let text = prompt.interact_text()?;

    if text.trim() == BACK_COMMAND {
        return Ok(Navigation::Back);
    }
    wizard.answer(&question.id, AnswerValue::Single(text))?;

    if question.question_type.accepts_uploads() {
        ask_uploads(wizard, question)?;
    }
    Ok(Navigation::Forward)
}

fn ask_uploads(wizard: &mut Wizard<'_>, question: &Question) -> Result<()> {
    for file in wizard.attachments().files(&question.id) {
        println!(
            "  {} {} {}",
            style("📎").dim(),
            file.name,
            style(format!("({})", format_file_size(file.size))).dim()
        );
    }

    loop {
        let attach = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Attach a document? ({})",
                question.accepted_file_types.as_deref().unwrap_or_default()
            ))
            .default(false)
            .interact()?;
        if !attach {
            return Ok(());
        }

        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("File path")
            .interact_text()?;
        match ingest_file(path.trim()) {
            Ok(file) => {
                println!(
                    "  {} Attached {} ({})",
                    style("✓").green(),
                    file.name,
                    format_file_size(file.size)
                );
                wizard.attach(&question.id, file)?;
            }
            Err(e) => eprintln!("  {} {}", style("✗").red(), e),
        }
    }
}

fn ask_single(wizard: &mut Wizard<'_>, question: &Question) -> Result<Navigation> {
    let mut items: Vec<String> = question
        .options
        .iter()
        .map(|o| match &o.description {
            Some(description) => format!("{} {}", o.label, style(format!("- {}", description)).dim()),
            None => o.label.clone(),
        })
        .collect();
    let back_index = wizard.can_go_back().then(|| {
        items.push(BACK_ITEM.to_string());
        items.len() - 1
    });

    let previous = wizard.answers().scalar(&question.id);
    let default = question
        .options
        .iter()
        .position(|o| o.value == previous)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(&question.text)
        .items(&items)
        .default(default)
        .interact()?;

    if Some(selection) == back_index {
        return Ok(Navigation::Back);
    }
    let value = question.options[selection].value.clone();
    wizard.answer(&question.id, AnswerValue::Single(value))?;
    Ok(Navigation::Forward)
}

fn ask_multi(wizard: &mut Wizard<'_>, question: &Question) -> Result<Navigation> {
    let previous = wizard.answers().array(&question.id);
    let items: Vec<String> = question.options.iter().map(|o| o.label.clone()).collect();
    let defaults: Vec<bool> = question
        .options
        .iter()
        .map(|o| previous.contains(&o.value))
        .collect();

    let selected = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} (space to toggle, enter to confirm)", question.text))
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    let chosen: Vec<&str> = selected
        .iter()
        .map(|&i| question.options[i].value.as_str())
        .collect();
    wizard.answer(
        &question.id,
        AnswerValue::Multi(merge_selection(&previous, &chosen)),
    )?;
    Ok(Navigation::Forward)
}

/// Keep earlier selections in their original order and append new ones
fn merge_selection(previous: &[String], chosen: &[&str]) -> Vec<String> {
    let mut merged: Vec<String> = previous
        .iter()
        .filter(|v| chosen.contains(&v.as_str()))
        .cloned()
        .collect();
    for value in chosen {
        if !merged.iter().any(|v| v == value) {
            merged.push(value.to_string());
        }
    }
    merged
}

fn export_blueprint(blueprint: &Blueprint, options: &DesignOptions, config: &Config) -> Result<()> {
    let json_path = match &options.export {
        Some(path) => Some(path.clone()),
        None => {
            let default = config.export.json_path.clone();
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Export blueprint to {}?", default.display()))
                .default(true)
                .interact()?
                .then_some(default)
        }
    };

    if let Some(path) = json_path {
        blueprint.write_json(&path)?;
        println!("{} Exported {}", style("✓").green(), path.display());
    }

    let markdown_path = options
        .markdown
        .clone()
        .or_else(|| config.export.markdown_path.clone());
    if let Some(path) = markdown_path {
        std::fs::write(&path, render_blueprint(blueprint, OutputFormat::Markdown)?)?;
        println!("{} Exported {}", style("✓").green(), path.display());
    }

    Ok(())
}

fn maybe_enrich(blueprint: &Blueprint, options: &DesignOptions, config: &Config) -> Result<()> {
    let wanted = options.enrich
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Generate detailed module content with AI?")
            .default(false)
            .interact()?;
    if !wanted {
        return Ok(());
    }

    // A failed call is reported and the session continues; the user may retry
    loop {
        match run_enrichment(&config.ai, blueprint) {
            Ok(enriched) => {
                println!();
                print!("{}", render_enriched(&enriched, OutputFormat::Text)?);

                let path = config.export.json_path.with_extension("enriched.json");
                let save = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Save enriched content to {}?", path.display()))
                    .default(true)
                    .interact()?;
                if save {
                    std::fs::write(&path, enriched.to_json_pretty()?)?;
                    println!("{} Exported {}", style("✓").green(), path.display());
                }
                return Ok(());
            }
            Err(_) => {
                let retry = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Try again?")
                    .default(false)
                    .interact()?;
                if !retry {
                    return Ok(());
                }
            }
        }
    }
}
