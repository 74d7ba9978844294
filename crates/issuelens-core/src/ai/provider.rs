// SPDX-License-Identifier: Apache-2.0

//! AI provider trait.
//!
//! Defines the `AiProvider` trait that text-generation backends implement.
//! The analysis pipeline only depends on this trait, so tests and
//! alternative backends can be swapped in without touching orchestration.

use async_trait::async_trait;

use super::types::PromptMessage;

/// A text-generation backend.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Sends the conversation and returns the first text candidate.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` when the provider rejects the request or replies
    /// without a usable candidate.
    async fn generate(&self, messages: &[PromptMessage]) -> crate::Result<String>;
}
