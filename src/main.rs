//! pathguard
//!
//! Turns an application's route and asset inventory into a compact edge
//! firewall expression and keeps the provider-side filter and rule in sync
//! with it.
//!
//! # Architecture Overview
//!
//! ```text
//!   route manifest ──┐
//!   asset roots ─────┼──▶ inventory ──▶ Compactor ──────────▶ expression
//!   extra paths ─────┘    (collect,     optimize, then            │
//!                          ignore)      condense until    ┌───────┴───────┐
//!                                       under budget      ▼               ▼
//!                                                      generate         sync
//!                                                      (stdout/file)  (filter +
//!                                                                     rule via
//!                                                                     provider API)
//! ```
//!
//! Everything to the left of the provider API runs offline; `generate`
//! needs no credentials at all.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pathguard::config::{self, GuardConfig};
use pathguard::inventory;
use pathguard::pathset::{CompactionOutcome, Compactor};
use pathguard::provider::EdgeClient;
use pathguard::sync;

#[derive(Parser)]
#[command(name = "pathguard")]
#[command(about = "Generate and sync edge firewall path allowlists", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to pathguard.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the match expression and print it
    Generate {
        /// Write the expression to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create or update the managed filter and rule at the provider
    Sync {
        /// Build and report without touching the provider
        #[arg(long)]
        dry_run: bool,
    },
    /// Purge the provider's cache for this zone
    Purge {
        /// Purge the entire zone cache
        #[arg(long)]
        everything: bool,
        /// Purge a specific URL (repeatable)
        #[arg(long = "file", value_name = "URL")]
        files: Vec<String>,
    },
    /// Delete the managed filter and rule
    Teardown,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match config::load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("pathguard: {err}");
            std::process::exit(2);
        }
    };

    init_tracing(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pathguard starting");

    if let Err(err) = run(cli.command, &config).await {
        tracing::error!(error = %err, "Command failed");
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("pathguard={level}"))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(command: Commands, config: &GuardConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Generate { output } => {
            let outcome = build_expression(config)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, outcome.expression.as_bytes())?;
                    tracing::info!(path = %path.display(), "Expression written");
                }
                None => println!("{}", outcome.expression),
            }
        }
        Commands::Sync { dry_run } => {
            let outcome = build_expression(config)?;
            if dry_run {
                println!("{}", outcome.expression);
                tracing::info!(
                    expression_chars = outcome.expression_chars(),
                    within_budget = outcome.within_budget,
                    "Dry run, nothing written to the provider"
                );
                return Ok(());
            }
            require_api_credentials(config)?;
            let client = EdgeClient::new(&config.provider, config.retries.clone())?;
            let report = sync::sync_firewall(&client, &config.rule, &outcome).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Purge { everything, files } => {
            require_api_credentials(config)?;
            let request = sync::build_purge_request(everything, files)?;
            let client = EdgeClient::new(&config.provider, config.retries.clone())?;
            let zone = sync::purge(&client, request).await?;
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "zone": zone }))?);
        }
        Commands::Teardown => {
            require_api_credentials(config)?;
            let client = EdgeClient::new(&config.provider, config.retries.clone())?;
            let report = sync::teardown(&client, &config.rule).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn build_expression(config: &GuardConfig) -> Result<CompactionOutcome, Box<dyn std::error::Error>> {
    let paths = inventory::collect(&config.inventory)?;
    let compactor = Compactor::new(
        config.budget.effective(),
        config.budget.max_condense_passes,
    );
    let outcome = compactor.compact(&paths)?;
    tracing::info!(
        paths = outcome.paths.len(),
        expression_chars = outcome.expression_chars(),
        condense_passes = outcome.condense_passes,
        within_budget = outcome.within_budget,
        "Expression built"
    );
    Ok(outcome)
}

fn require_api_credentials(config: &GuardConfig) -> Result<(), config::ConfigError> {
    config::validate_for_api(config).map_err(config::ConfigError::Validation)
}
