// SPDX-License-Identifier: Apache-2.0

//! AI request/response types for the Gemini `generateContent` API.
//!
//! Defines the structures used for communicating with the Gemini API
//! and the analysis record returned to callers.

use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Speaker of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (all prompts sent by IssueLens).
    #[default]
    User,
    /// The model (only seen in responses).
    Model,
}

/// A single message in the conversation sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    /// Who is speaking.
    pub role: Role,
    /// Message text.
    pub text: String,
}

impl PromptMessage {
    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

/// A text fragment inside a Gemini content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Text payload. Absent for non-text parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A Gemini content block (one conversation turn).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Speaker role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Ordered parts of the turn.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl From<&PromptMessage> for Content {
    fn from(message: &PromptMessage) -> Self {
        Self {
            role: Some(message.role),
            parts: vec![Part {
                text: Some(message.text.clone()),
            }],
        }
    }
}

/// Sampling parameters for a generation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens in the reply.
    pub max_output_tokens: u32,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation history.
    pub contents: Vec<Content>,
    /// Sampling parameters.
    pub generation_config: GenerationConfig,
}

/// Response body of `generateContent`.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    /// Alternative completions, best first.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One completion candidate.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    /// Generated content; missing when the candidate was blocked.
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Normalized issue contents fed to the prompt builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Issue title.
    pub title: String,
    /// Issue body (markdown). Empty when GitHub returns none.
    #[builder(default)]
    pub body: String,
    /// Comment bodies in thread order.
    #[builder(default)]
    pub comments: Vec<String>,
}

/// Classification of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Something is broken.
    Bug,
    /// Request for new functionality.
    FeatureRequest,
    /// Documentation gap or error.
    Documentation,
    /// Usage question.
    Question,
    /// Anything else, including values outside the schema.
    #[default]
    Other,
}

impl IssueType {
    /// Parses a model-provided type, tolerating case and separators.
    #[must_use]
    pub fn from_model(value: &str) -> Self {
        match value.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "bug" => IssueType::Bug,
            "feature_request" | "feature" => IssueType::FeatureRequest,
            "documentation" | "docs" => IssueType::Documentation,
            "question" => IssueType::Question,
            _ => IssueType::Other,
        }
    }

    /// Schema name of this type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Bug => "bug",
            IssueType::FeatureRequest => "feature_request",
            IssueType::Documentation => "documentation",
            IssueType::Question => "question",
            IssueType::Other => "other",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured analysis returned by the model.
///
/// Always serializes with all five schema keys. Construction from a model
/// reply is lenient: missing keys become empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One-sentence summary of the issue.
    #[serde(default)]
    pub summary: String,
    /// Issue classification.
    #[serde(rename = "type", default)]
    pub issue_type: IssueType,
    /// `"N - justification"` where N is 1 (low) to 5 (critical).
    #[serde(default)]
    pub priority_score: String,
    /// Suggested GitHub labels.
    #[serde(default)]
    pub suggested_labels: Vec<String>,
    /// Impact on users, or value added for features.
    #[serde(default)]
    pub potential_impact: String,
}

impl AnalysisResult {
    /// Builds a result from a parsed JSON object without validating fields.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            summary: string_field(object, "summary"),
            issue_type: IssueType::from_model(&string_field(object, "type")),
            priority_score: string_field(object, "priority_score"),
            suggested_labels: object
                .get("suggested_labels")
                .map(labels_field)
                .unwrap_or_default(),
            potential_impact: string_field(object, "potential_impact"),
        }
    }

    /// Numeric priority (1-5) parsed from the start of `priority_score`.
    #[must_use]
    pub fn priority(&self) -> Option<u8> {
        let score = self.priority_score.trim_start();
        let end = score
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(score.len());
        score[..end]
            .parse::<u8>()
            .ok()
            .filter(|p| (1..=5).contains(p))
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn labels_field(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
