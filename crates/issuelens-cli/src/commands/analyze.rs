// SPDX-License-Identifier: Apache-2.0

//! Analyze command - runs the pipeline for one issue.

use anyhow::Result;
use issuelens_core::{Analyzer, AppConfig, EnvCredentials};
use tracing::debug;

use super::types::AnalyzeResult;

/// Analyzes `repo_url` issue `issue_number` with the configured model.
pub async fn run(config: &AppConfig, repo_url: String, issue_number: u64) -> Result<AnalyzeResult> {
    let analyzer = Analyzer::from_config(config, &EnvCredentials)?;
    debug!(model = %config.ai.model, "Analyzer ready");

    let analysis = analyzer.analyze(&repo_url, issue_number).await?;

    Ok(AnalyzeResult {
        repo_url,
        issue_number,
        analysis,
    })
}
