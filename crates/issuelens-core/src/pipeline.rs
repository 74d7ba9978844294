// SPDX-License-Identifier: Apache-2.0

//! Issue analysis pipeline.
//!
//! Sequences URL parsing, issue fetching, prompt construction, the model
//! call, and JSON extraction for a single request. Each run is independent;
//! an [`Analyzer`] only holds immutable settings and pooled HTTP clients,
//! so it can be shared behind an `Arc`.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::ai::extract::extract_with_repair;
use crate::ai::gemini::GeminiClient;
use crate::ai::prompt::build_prompt;
use crate::ai::provider::AiProvider;
use crate::ai::types::{AnalysisResult, PromptMessage};
use crate::auth::CredentialProvider;
use crate::config::AppConfig;
use crate::error::IssueLensError;
use crate::github::{GitHubClient, parse_repo_url};

/// Message returned for any repository URL that fails to parse.
pub const INVALID_REPO_URL_MESSAGE: &str = "Invalid GitHub repo URL";

/// Stage of a pipeline run, recorded in log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Extracting owner and repo from the URL.
    ParsingUrl,
    /// Fetching the issue and its comments.
    FetchingIssue,
    /// Rendering the analysis prompt.
    BuildingPrompt,
    /// Waiting on the model.
    CallingModel,
    /// Extracting the JSON object from the reply.
    ExtractingJson,
    /// Asking the model to fix an invalid reply.
    RepairingJson,
    /// Run completed successfully.
    Done,
    /// Run failed.
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::ParsingUrl => "parsing_url",
            PipelineStage::FetchingIssue => "fetching_issue",
            PipelineStage::BuildingPrompt => "building_prompt",
            PipelineStage::CallingModel => "calling_model",
            PipelineStage::ExtractingJson => "extracting_json",
            PipelineStage::RepairingJson => "repairing_json",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Analyzes GitHub issues with a model provider.
pub struct Analyzer {
    github: GitHubClient,
    provider: Arc<dyn AiProvider>,
    repair_attempts: u32,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("github", &self.github)
            .field("provider", &self.provider.name())
            .field("repair_attempts", &self.repair_attempts)
            .finish()
    }
}

impl Analyzer {
    /// Creates an analyzer from explicit collaborators.
    #[must_use]
    pub fn new(github: GitHubClient, provider: Arc<dyn AiProvider>, repair_attempts: u32) -> Self {
        Self {
            github,
            provider,
            repair_attempts,
        }
    }

    /// Creates an analyzer backed by Gemini.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if no Gemini key is available, or `Config`
    /// if an HTTP client cannot be built.
    pub fn from_config(
        config: &AppConfig,
        credentials: &dyn CredentialProvider,
    ) -> crate::Result<Self> {
        let github = GitHubClient::from_credentials(&config.github, credentials)?;
        let gemini = GeminiClient::new(&config.ai, credentials)?;
        Ok(Self::new(github, Arc::new(gemini), config.ai.repair_attempts))
    }

    /// Runs the full pipeline for one issue.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a malformed URL or an issue number of zero
    /// - `NotFound`, `AccessDenied`, `Upstream` from GitHub or the model
    /// - `MalformedOutput` when the reply stays invalid after repair
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn analyze(
        &self,
        repo_url: &str,
        issue_number: u64,
    ) -> crate::Result<AnalysisResult> {
        let result = self.run(repo_url, issue_number).await;
        match &result {
            Ok(_) => debug!(stage = %PipelineStage::Done, "Analysis complete"),
            Err(e) => warn!(
                stage = %PipelineStage::Failed,
                category = e.category(),
                error = %e,
                "Analysis failed"
            ),
        }
        result
    }

    async fn run(&self, repo_url: &str, issue_number: u64) -> crate::Result<AnalysisResult> {
        debug!(stage = %PipelineStage::ParsingUrl, "Entering stage");
        let (owner, repo) = parse_repo_url(repo_url).map_err(|e| {
            debug!(error = %e, "Repository URL rejected");
            IssueLensError::invalid_input(INVALID_REPO_URL_MESSAGE)
        })?;
        if issue_number == 0 {
            return Err(IssueLensError::invalid_input(
                "Issue number must be a positive integer",
            ));
        }

        debug!(stage = %PipelineStage::FetchingIssue, "Entering stage");
        let issue = self.github.fetch_issue(&owner, &repo, issue_number).await?;

        debug!(stage = %PipelineStage::BuildingPrompt, "Entering stage");
        let mut messages = vec![PromptMessage::user(build_prompt(&issue))];

        debug!(stage = %PipelineStage::CallingModel, "Entering stage");
        let reply = self.provider.generate(&messages).await?;

        debug!(stage = %PipelineStage::ExtractingJson, "Entering stage");
        extract_with_repair(
            self.provider.as_ref(),
            &mut messages,
            reply,
            self.repair_attempts,
        )
        .await
    }
}
