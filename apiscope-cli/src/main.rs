//! apiscope CLI - export HTTP requests from Spring controller models.
//!
//! # Commands
//!
//! - `apiscope export --model <file|url>` - Export one request per handler method
//! - `apiscope classes --model <file|url>` - List classes and controllers

use apiscope_core::logging::{LogConfig, LogFormat, LogLevel};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod error;

use commands::export::OutputFormat;
use commands::{classes, export, load_sources};
use error::CliResult;

/// apiscope - request inference for Spring controllers
#[derive(Parser)]
#[command(name = "apiscope")]
#[command(version)]
#[command(about = "Export HTTP requests inferred from Spring controller annotations")]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} apiscope export --model model.json\n  {} apiscope export --model model.json --class com.example.UserController --format table\n  {} apiscope classes --model https://example.com/model.json",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one request per handler method
    #[command(alias = "e")]
    Export(ExportArgs),

    /// List classes of the model
    #[command(alias = "ls")]
    Classes(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Model document, a file path or an http(s) URL
    #[arg(short, long, env = "APISCOPE_MODEL")]
    model: String,

    /// Configuration file (JSON, TOML or .env)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Only export this class (qualified name)
    #[arg(long)]
    class: Option<String>,

    /// Output format, defaults to the settings value or json
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

fn log_config(cli: &Cli) -> LogConfig {
    let level = if cli.verbose {
        LogLevel::Debug
    } else if cli.quiet {
        LogLevel::Error
    } else {
        LogLevel::Warn
    };
    LogConfig::new()
        .level(level)
        .format(LogFormat::Compact)
        .with_colors(!cli.no_color)
}

async fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Export(args) => {
            let sources = load_sources(
                &args.source.model,
                args.source.config.as_deref(),
                args.source.settings.as_deref(),
            )
            .await?;
            export::execute(&sources, args.class.as_deref(), args.format)
        }
        Commands::Classes(args) => {
            let sources =
                load_sources(&args.model, args.config.as_deref(), args.settings.as_deref()).await?;
            classes::execute(&sources)
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let _guard = log_config(&cli).init().ok();

    if let Err(e) = run(cli.command).await {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
