//! linebreak-lint CLI tool.
//!
//! Usage:
//! ```bash
//! linebreak-lint check [OPTIONS] [PATH]
//! linebreak-lint list-types
//! linebreak-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use linebreak_lint_core::Severity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Enforces line breaks and blank lines between JavaScript statements
#[derive(Parser)]
#[command(name = "linebreak-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LINEBREAK_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check statement spacing
    Check {
        /// File or directory to check
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write automatic fixes back to the files
        #[arg(long)]
        fix: bool,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Lowest severity that makes the run exit with status 1
        #[arg(long, default_value = "error")]
        fail_on: FailOn,
    },

    /// List statement types and requirements usable in rules
    ListTypes,

    /// Create a linebreak-lint.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Source snippets with labelled spans.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One line per violation.
    Compact,
}

/// Severity threshold for a failing exit status.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum FailOn {
    /// Fail on errors only.
    #[default]
    Error,
    /// Fail on warnings and errors.
    Warning,
    /// Fail on any violation.
    Info,
}

impl From<FailOn> for Severity {
    fn from(threshold: FailOn) -> Self {
        match threshold {
            FailOn::Error => Self::Error,
            FailOn::Warning => Self::Warning,
            FailOn::Info => Self::Info,
        }
    }
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
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            fix,
            exclude,
            fail_on,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let options = commands::check::CheckOptions {
                format,
                fix,
                exclude,
                fail_on: fail_on.into(),
            };
            commands::check::run(&path, &source, options)
        }
        Commands::ListTypes => {
            commands::list_types::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
