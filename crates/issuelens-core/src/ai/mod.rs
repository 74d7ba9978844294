// SPDX-License-Identifier: Apache-2.0

//! AI integration module.
//!
//! Provides the Gemini client, prompt construction, and JSON extraction
//! for issue analysis.

pub mod extract;
pub mod gemini;
pub mod prompt;
pub mod provider;
pub mod types;

pub use extract::{extract_json_object, extract_with_repair};
pub use gemini::GeminiClient;
pub use prompt::build_prompt;
pub use provider::AiProvider;
pub use types::{AnalysisResult, IssueRecord, IssueType, PromptMessage, Role};
