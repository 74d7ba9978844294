// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `IssueLensError` and appends a tip for the
//! error category. The library stays free of presentation concerns.

use std::fmt::Write;

use anyhow::Error;
use issuelens_core::IssueLensError;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not an `IssueLensError`, returns the full error chain.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<IssueLensError>() else {
        return format!("{error:#}");
    };

    match err {
        IssueLensError::InvalidInput { .. } => format!(
            "{err}\n\nTip: Use a repository URL like https://github.com/owner/repo and a positive issue number."
        ),
        IssueLensError::NotFound => format!(
            "{err}\n\nTip: Check the issue number, and that the repository is public or your token can read it."
        ),
        IssueLensError::AccessDenied => format!(
            "{err}\n\nTip: Set GITHUB_TOKEN to raise the GitHub API rate limit."
        ),
        IssueLensError::Upstream { status, .. } => {
            let mut msg = err.to_string();
            if let Some(code) = status {
                let _ = write!(msg, " (HTTP {code})");
            }
            msg.push_str("\n\nTip: This may be a temporary issue upstream. Try again in a moment.");
            msg
        }
        IssueLensError::MalformedOutput => format!(
            "{err}\n\nTip: The model reply could not be parsed. Re-running usually helps."
        ),
        IssueLensError::MissingApiKey { env_var } => format!(
            "{err}\n\nTip: Export {env_var} with a Google AI Studio API key."
        ),
        IssueLensError::Config { .. } => format!(
            "{err}\n\nTip: Check your config file at {}",
            issuelens_core::config_file_path().display()
        ),
    }
}
