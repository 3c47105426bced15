//! @acp:module "Questions Command"
//! @acp:summary "List the question catalogue"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::catalogue::{Activation, Catalogue, Stage};

/// Options for the questions command
#[derive(Debug, Clone, Default)]
pub struct QuestionsOptions {
    /// Output as JSON (default: human-readable)
    pub json: bool,
}

/// Execute the questions command
pub fn execute_questions(options: QuestionsOptions) -> Result<()> {
    let catalogue = Catalogue::builtin();

    if options.json {
        println!("{}", serde_json::to_string_pretty(catalogue.questions())?);
        return Ok(());
    }

    for &stage in Stage::all() {
        let info = catalogue.stage_info(stage);
        println!(
            "\n{} {} {}",
            info.icon,
            style(format!("Stage {}:", stage)).bold(),
            style(info.title).bold().cyan()
        );
        println!("  {}", style(info.description).dim());

        for question in catalogue.stage_questions(stage) {
            let marker = if question.required {
                style("*").red().to_string()
            } else {
                " ".to_string()
            };
            println!(
                "\n  {}{} {}",
                marker,
                style(&question.id).cyan(),
                style(format!("[{}]", question.question_type.as_str())).dim()
            );
            println!("    {}", question.text);

            if let Activation::WhenAnswerEquals { question: dep, value } = &question.activation {
                println!("    {}", style(format!("only when {} = {}", dep, value)).yellow());
            }
            for option in &question.options {
                println!("    - {} {}", style(&option.value).green(), option.label);
            }
        }
    }

    println!("\n{} required", style("*").red());
    Ok(())
}
