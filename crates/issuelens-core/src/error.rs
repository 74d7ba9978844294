// SPDX-License-Identifier: Apache-2.0

//! Error types for IssueLens.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Every variant maps to a stable category string so outer layers (HTTP,
//! CLI) can tell failures apart without matching on messages.

use thiserror::Error;

/// Message returned when the model never produced a usable JSON object.
pub const MALFORMED_OUTPUT_MESSAGE: &str = "LLM output invalid JSON. Try again.";

/// Errors that can occur while analyzing an issue.
#[derive(Error, Debug)]
pub enum IssueLensError {
    /// Caller supplied a bad repository URL or issue number.
    #[error("{message}")]
    InvalidInput {
        /// Human-readable detail.
        message: String,
    },

    /// The requested issue does not exist.
    #[error("Issue not found")]
    NotFound,

    /// GitHub refused the request (forbidden or rate limited).
    #[error("GitHub access forbidden (possibly rate limited)")]
    AccessDenied,

    /// An upstream API (GitHub or the model provider) failed.
    #[error("{service} error: {message}")]
    Upstream {
        /// Which upstream failed (e.g., `GitHub`, `Gemini API`).
        service: String,
        /// Error detail, usually the raw response body.
        message: String,
        /// HTTP status code, if a response was received.
        status: Option<u16>,
    },

    /// The model reply was not valid JSON, even after repair.
    #[error("{}", MALFORMED_OUTPUT_MESSAGE)]
    MalformedOutput,

    /// The model API key is not configured.
    #[error("Missing {env_var} environment variable")]
    MissingApiKey {
        /// Environment variable that should hold the key.
        env_var: String,
    },

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },
}

impl IssueLensError {
    /// Creates an `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        IssueLensError::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an `Upstream` error.
    pub fn upstream(service: &str, message: impl Into<String>, status: Option<u16>) -> Self {
        IssueLensError::Upstream {
            service: service.to_string(),
            message: message.into(),
            status,
        }
    }

    /// Machine-readable error category.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            IssueLensError::InvalidInput { .. } => "invalid_input",
            IssueLensError::NotFound => "not_found",
            IssueLensError::AccessDenied => "access_denied",
            IssueLensError::Upstream { .. } => "upstream",
            IssueLensError::MalformedOutput => "malformed_output",
            IssueLensError::MissingApiKey { .. } | IssueLensError::Config { .. } => "config",
        }
    }
}

impl From<config::ConfigError> for IssueLensError {
    fn from(err: config::ConfigError) -> Self {
        IssueLensError::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_distinct() {
        let errors = [
            IssueLensError::invalid_input("bad"),
            IssueLensError::NotFound,
            IssueLensError::AccessDenied,
            IssueLensError::upstream("GitHub", "boom", Some(500)),
            IssueLensError::MalformedOutput,
        ];
        let mut categories: Vec<_> = errors.iter().map(IssueLensError::category).collect();
        categories.sort_unstable();
        categories.dedup();
        assert_eq!(categories.len(), 5);
    }

    #[test]
    fn test_malformed_output_message() {
        assert_eq!(
            IssueLensError::MalformedOutput.to_string(),
            MALFORMED_OUTPUT_MESSAGE
        );
        assert_eq!(MALFORMED_OUTPUT_MESSAGE, "LLM output invalid JSON. Try again.");
    }

    #[test]
    fn test_upstream_display_includes_service() {
        let err = IssueLensError::upstream("Gemini API", "quota exceeded", Some(429));
        assert_eq!(err.to_string(), "Gemini API error: quota exceeded");
    }
}
