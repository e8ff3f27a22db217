//! Postgate CLI - check generated campaigns before they are published
//!
//! Reads provider responses or post maps from files (or `-` for stdin) and
//! prints the normalized content, guardrail verdicts or full reviews as JSON.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use postgate_core::POSTGATE_VERSION;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "postgate")]
#[command(about = "Normalize and guardrail generated marketing copy", long_about = None)]
#[command(version = POSTGATE_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a provider response and print the parsed content
    Parse {
        /// Provider that produced the response (claude, openai, replicate)
        #[arg(long, short)]
        provider: String,

        /// Response JSON file, or - for stdin
        input: PathBuf,
    },

    /// Validate a posts object against the guardrails
    Validate {
        /// Guardrail profile YAML (defaults to the standard profile)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Posts JSON file, or - for stdin
        input: PathBuf,
    },

    /// Normalize and validate a provider response
    Review {
        /// Provider that produced the response (claude, openai, replicate)
        #[arg(long, short)]
        provider: String,

        /// Guardrail profile YAML (defaults to the standard profile)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Print the flat campaign record instead of the full review
        #[arg(long)]
        record: bool,

        /// Response JSON file, or - for stdin
        input: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let status = match cli.command {
        Commands::Parse { provider, input } => commands::parse(&provider, &input),
        Commands::Validate { profile, input } => commands::validate(profile.as_deref(), &input),
        Commands::Review {
            provider,
            profile,
            record,
            input,
        } => commands::review(&provider, profile.as_deref(), record, &input),
    }?;

    Ok(ExitCode::from(status))
}
