// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the IssueLens CLI.

pub mod analyze;
pub mod serve;
pub mod types;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use issuelens_core::AppConfig;

use crate::cli::{Commands, OutputContext};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if !ctx.is_interactive() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

/// Dispatch to the appropriate command handler.
pub async fn run(command: Commands, ctx: OutputContext, config: AppConfig) -> Result<()> {
    match command {
        Commands::Analyze {
            repo_url,
            issue_number,
        } => {
            let spinner = maybe_spinner(&ctx, "Analyzing issue...");
            let result = analyze::run(&config, repo_url, issue_number).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }
        Commands::Serve { host, port } => serve::run(config, host, port).await,
    }
}
