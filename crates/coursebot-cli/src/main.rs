use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use coursebot_interaction::telemetry::init_tracing;

mod commands;

use commands::ask::AskMode;

#[derive(Parser)]
#[command(name = "coursebot")]
#[command(about = "Coursebot - ask the lesson assistant from the command line", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.config/coursebot/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a message and print the reply
    Ask {
        #[arg(long, value_enum, default_value_t = AskMode::Qa)]
        mode: AskMode,
        /// Lesson transcript the question is about
        #[arg(long)]
        transcript: Option<String>,
        message: String,
    },
    /// Submit feedback about the lesson
    Feedback { message: String },
    /// Summarize a lesson transcript
    Summarize {
        #[arg(long)]
        transcript: Option<String>,
    },
    /// Format summary text read from FILE (or stdin) as widget markup
    FormatSummary { file: Option<PathBuf> },
    /// Print the widget markup
    Render {
        /// Render the widget opened, with the welcome messages
        #[arg(long)]
        open: bool,
    },
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Ask {
            mode,
            transcript,
            message,
        } => commands::ask::run(config, mode, transcript, &message).await?,
        Commands::Feedback { message } => commands::feedback::run(config, &message).await?,
        Commands::Summarize { transcript } => commands::summarize::run(config, transcript).await?,
        Commands::FormatSummary { file } => commands::format_summary::run(file.as_deref())?,
        Commands::Render { open } => commands::render::run(config, open)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(config)?,
            ConfigAction::Path => commands::config::path(config)?,
        },
    }

    Ok(())
}
