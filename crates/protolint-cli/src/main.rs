//! protolint CLI tool.
//!
//! Usage:
//! ```bash
//! protoc --include_source_info --descriptor_set_out=api.pb api/*.proto
//! protolint lint --descriptor-set-in api.pb [FILES]...
//! protolint list-rules
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use protolint_core::RuleRegistry;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

use commands::lint::LintOptions;

/// Linter for protobuf API definitions
#[derive(Parser)]
#[command(name = "protolint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint files from compiled descriptor sets
    Lint(LintArgs),

    /// List available rules
    ListRules,
}

#[derive(Args)]
struct LintArgs {
    /// Files to lint, as named in the descriptor sets (default: all)
    files: Vec<String>,

    /// Serialized FileDescriptorSet produced with --include_source_info
    #[arg(long = "descriptor-set-in", required = true)]
    descriptor_sets: Vec<PathBuf>,

    /// Configuration file; repeat to add layers, later files win
    #[arg(short, long)]
    config: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, default_value = "text")]
    output_format: OutputFormat,

    /// Disable a rule or rule namespace (repeatable)
    #[arg(long)]
    disable_rule: Vec<String>,

    /// Enable a rule or rule namespace (repeatable)
    #[arg(long)]
    enable_rule: Vec<String>,

    /// Ignore `(-- api-linter: ... --)` suppression comments
    #[arg(long)]
    ignore_comment_disables: bool,

    /// Exit with status 1 when any problem is found
    #[arg(long)]
    set_exit_status: bool,

    /// Lint files in parallel
    #[arg(long)]
    parallel: bool,
}

/// Output format for lint responses.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// YAML output.
    Yaml,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut registry = RuleRegistry::new();
    protolint_rules::register_all(&mut registry).context("Failed to register built-in rules")?;

    match cli.command {
        Commands::Lint(args) => {
            let options = LintOptions {
                descriptor_sets: args.descriptor_sets,
                files: args.files,
                configs: args.config,
                format: args.output_format,
                enable_rules: args.enable_rule,
                disable_rules: args.disable_rule,
                ignore_comment_disables: args.ignore_comment_disables,
                set_exit_status: args.set_exit_status,
                parallel: args.parallel,
            };
            let project_dir =
                std::env::current_dir().context("Failed to read working directory")?;
            let failed = commands::lint::run(&options, &project_dir, &registry)?;
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::ListRules => {
            commands::list_rules::run(&registry);
            Ok(ExitCode::SUCCESS)
        }
    }
}
