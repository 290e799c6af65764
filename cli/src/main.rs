// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Facety Agreements CLI
//!
//! The `facety` binary calls the agreements services from the command line.
//!
//! ## Commands
//!
//! - `facety adoption check-protocol|add-protocol|add-remark <JSON>`
//! - `facety receiving texts <JSON>`
//! - `facety proto` - print the bundled protocol definition
//! - `facety meta` - print the service descriptor document
//!
//! Without `--host`, the host comes from the environment variable named in
//! the descriptor document, or from its default.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use facety_agreements::{ClientOptions, ResponseShape, Scopes};
use tracing::debug;

use facety_cli::commands::{self, AdoptionCommand, ReceivingCommand};

/// Facety agreements client
#[derive(Parser)]
#[command(name = "facety")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Service host (overrides the descriptor document and environment)
    #[arg(long, global = true, value_name = "HOST:PORT")]
    host: Option<String>,

    /// Authorization scope; repeat for several (default: the host)
    #[arg(long, global = true, value_name = "SCOPE")]
    scope: Vec<String>,

    /// Plaintext channel without credentials (local testing)
    #[arg(long, global = true)]
    insecure: bool,

    /// Print the typed response instead of JSON
    #[arg(long, global = true)]
    typed: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "FACETY_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Adoption service: acceptance protocols and remarks
    #[command(name = "adoption")]
    Adoption {
        #[command(subcommand)]
        command: AdoptionCommand,
    },

    /// Receiving service: agreement texts
    #[command(name = "receiving")]
    Receiving {
        #[command(subcommand)]
        command: ReceivingCommand,
    },

    /// Print the bundled protocol definition
    #[command(name = "proto")]
    Proto,

    /// Print the service descriptor document
    #[command(name = "meta")]
    Meta,
}

impl Cli {
    fn client_options(&self) -> ClientOptions {
        ClientOptions {
            host: self.host.clone(),
            scope: (!self.scope.is_empty()).then(|| Scopes::from(self.scope.clone())),
            insecure: self.insecure,
        }
    }
}

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log_level)?;

    let options = cli.client_options();
    let shape = ResponseShape::from_simple(!cli.typed);
    debug!(?options, ?shape, "Resolved command line options");

    match cli.command {
        Commands::Adoption { command } => {
            commands::adoption::handle_command(command, options, shape).await
        }
        Commands::Receiving { command } => {
            commands::receiving::handle_command(command, options, shape).await
        }
        Commands::Proto => commands::schema::proto(),
        Commands::Meta => commands::schema::meta().await,
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}
