#![forbid(unsafe_code)]
//! Sophia Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sophia::commands::{
    execute_compile, execute_design, execute_enrich, execute_questions, execute_validate,
    parse_attachment, CompileOptions, DesignOptions, EnrichOptions, QuestionsOptions,
    ValidateOptions,
};
use sophia::config::CONFIG_FILE_NAME;
use sophia::render::OutputFormat;
use sophia::Config;

#[derive(Parser)]
#[command(name = "sophia")]
#[command(about = "Sophia Course Design Studio - backward-design course blueprints")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive questionnaire and build a blueprint
    Design {
        /// Prefill answers from a .json/.yaml file
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Export the blueprint JSON to this path without asking
        #[arg(long)]
        export: Option<PathBuf>,

        /// Also export a Markdown version
        #[arg(long)]
        markdown: Option<PathBuf>,

        /// Generate detailed content with AI without asking
        #[arg(long)]
        enrich: bool,

        /// Save the collected answers to this path
        #[arg(long)]
        save_answers: Option<PathBuf>,
    },

    /// Compile an answers file into a blueprint
    Compile {
        /// Answers file (.json, .yaml, .yml)
        answers: PathBuf,

        /// Output format (text, markdown, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Attach a document to an upload question (QUESTION_ID=PATH, repeatable)
        #[arg(long, value_parser = parse_attachment)]
        attach: Vec<(String, PathBuf)>,
    },

    /// Enrich an exported blueprint with AI-generated content
    Enrich {
        /// Blueprint JSON file
        blueprint: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (text, markdown, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate a blueprint or AI reply against its schema
    Validate {
        /// File to validate
        file: PathBuf,
    },

    /// List the questionnaire
    Questions {
        /// Output as JSON (default: human-readable)
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "sophia=debug" } else { "sophia=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> anyhow::Result<()> {
    // .env.local wins over .env; neither is required
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::load_or_default()
    };

    match cli.command {
        Commands::Design {
            answers,
            export,
            markdown,
            enrich,
            save_answers,
        } => {
            let options = DesignOptions {
                answers,
                export,
                markdown,
                enrich,
                save_answers,
            };
            execute_design(options, &config)?;
        }

        Commands::Compile {
            answers,
            format,
            output,
            attach,
        } => {
            let options = CompileOptions {
                answers,
                format,
                output,
                attach,
            };
            execute_compile(options)?;
        }

        Commands::Enrich {
            blueprint,
            output,
            format,
        } => {
            let options = EnrichOptions {
                blueprint,
                output,
                format,
            };
            execute_enrich(options, &config.ai)?;
        }

        Commands::Validate { file } => {
            execute_validate(ValidateOptions { file })?;
        }

        Commands::Questions { json } => {
            execute_questions(QuestionsOptions { json })?;
        }
    }

    Ok(())
}
