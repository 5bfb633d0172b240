mod commands;
mod forward;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dce")]
#[command(version, about = "Data Contracts Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a batch of rows against a contract
    Validate {
        /// Path to the contract file (YAML, TOML or JSON)
        contract: PathBuf,

        /// Path to the rows file (JSON array, or JSON Lines with .jsonl/.ndjson)
        #[arg(short, long)]
        rows: PathBuf,

        /// Evaluation instant for freshness (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Base URL of the event store to forward the validation event to
        #[arg(long, env = "DCE_EVENTS_URL")]
        forward_url: Option<String>,
    },

    /// Check a contract definition without validating data
    Check {
        /// Path to the contract file (YAML, TOML or JSON)
        contract: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate a `{contract, rows}` request document and print the response
    Request {
        /// Path to the request document (JSON)
        request: PathBuf,

        /// Evaluation instant for freshness (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,

        /// Base URL of the event store to forward the validation event to
        #[arg(long, env = "DCE_EVENTS_URL")]
        forward_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    let passed = match cli.command {
        Commands::Validate {
            contract,
            rows,
            now,
            format,
            forward_url,
        } => {
            commands::validate::execute(
                &contract,
                &rows,
                now.as_deref(),
                format,
                forward_url.as_deref(),
            )
            .await?
        }

        Commands::Check { contract, format } => commands::check::execute(&contract, format)?,

        Commands::Request {
            request,
            now,
            forward_url,
        } => commands::request::execute(&request, now.as_deref(), forward_url.as_deref()).await?,
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
