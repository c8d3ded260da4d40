// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! procd - conversation procedure host
//!
//! `check` validates and compiles a procedure document; `serve` routes
//! JSON-line updates from stdin and prints outbound messages to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ep_adapters::{ConsoleTransport, NoOpTransport, TracedTransport};
use ep_engine::ProcedureEngine;
use ep_host::logging::setup_logging;
use ep_host::output::{self, OutputFormat};
use ep_host::{apply_handlers, serve, HostConfig, Summary};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "procd", version, about = "Conversation procedure host")]
struct Cli {
    /// Host configuration file (procd.toml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Procedure document, overrides the config file
    #[arg(long, global = true)]
    procedures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and compile the procedure document
    Check {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Route updates read from stdin, one JSON object per line
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };
    if let Some(procedures) = cli.procedures {
        config.procedures = Some(procedures);
    }

    let _log_guard = setup_logging(&config)?;

    let procedures_path = config.procedures_path()?;
    let json = std::fs::read_to_string(procedures_path)
        .with_context(|| format!("failed to read {}", procedures_path.display()))?;

    match cli.command {
        Commands::Check { format } => {
            let mut engine = ProcedureEngine::from_json(NoOpTransport::new(), &json)?;
            apply_handlers(&mut engine, &config.handlers)?;
            println!("{}", output::render(&Summary::of(&engine), format)?);
        }

        Commands::Serve => {
            let transport = TracedTransport::new(ConsoleTransport::stdout());
            let mut engine = ProcedureEngine::from_json(transport, &json)?;
            apply_handlers(&mut engine, &config.handlers)?;

            info!(
                procedures = %procedures_path.display(),
                stages = engine.stage_count(),
                options = engine.option_count(),
                handlers = engine.handler_count(),
                "serving"
            );

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            serve(Arc::new(engine), Arc::new(config.start.clone()), stdin).await?;
        }
    }

    Ok(())
}
