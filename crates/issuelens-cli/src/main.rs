// SPDX-License-Identifier: Apache-2.0

//! IssueLens - AI-assisted GitHub issue analysis.
//!
//! Fetches a GitHub issue, asks Gemini to classify and summarize it, and
//! renders the result in the terminal or as JSON/YAML.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use issuelens_core::load_config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if let Some(model) = &cli.model {
        config.ai.model.clone_from(model);
        debug!("Overriding Gemini model to: {model}");
    }

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet);
    commands::run(cli.command, output_ctx, config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", errors::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
