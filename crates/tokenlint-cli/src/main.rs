//! tokenlint CLI tool.
//!
//! Usage:
//! ```bash
//! tokenlint check [OPTIONS] [PATH]
//! tokenlint contrast <TEXT> <BACKGROUND>
//! tokenlint resolve --brand <ID>
//! tokenlint rules [--project <ID>] [--brand <ID>]
//! tokenlint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod sources;

/// Design-token validator: naming, value grammars, alias integrity,
/// contrast compliance, and brand inheritance resolution
#[derive(Parser)]
#[command(name = "tokenlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate token documents
    Check {
        /// Path to a token document or a directory to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Severity threshold for a non-zero exit code
        #[arg(long)]
        fail_on: Option<String>,
    },

    /// Analyze a text/background color pair
    Contrast {
        /// Text (foreground) color
        text: String,

        /// Background color
        background: String,

        /// Text size class: normal or large
        #[arg(short, long, default_value = "normal")]
        size: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve the effective token set for a brand
    Resolve {
        /// Brand identifier
        #[arg(long)]
        brand: String,

        /// Chase surviving alias values to their final targets
        #[arg(long)]
        follow_aliases: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the effective rule set after cascade resolution
    Rules {
        /// Project identifier
        #[arg(long)]
        project: Option<String>,

        /// Brand identifier
        #[arg(long)]
        brand: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for command results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            fail_on,
        } => commands::check::run(&path, format, exclude, fail_on, cli.config.as_deref()),
        Commands::Contrast {
            text,
            background,
            size,
            format,
        } => commands::contrast::run(&text, &background, &size, format, cli.config.as_deref()),
        Commands::Resolve {
            brand,
            follow_aliases,
            format,
        } => commands::resolve::run(&brand, follow_aliases, format, cli.config.as_deref()),
        Commands::Rules {
            project,
            brand,
            format,
        } => commands::rules::run(project.as_deref(), brand.as_deref(), format, cli.config.as_deref()),
        Commands::Init { force } => commands::init::run(force),
    }
}
