// SPDX-License-Identifier: Apache-2.0

//! Credential provider abstraction.
//!
//! The pipeline never reads credentials from the environment directly; it
//! asks a `CredentialProvider`. Binaries use [`EnvCredentials`], tests plug
//! in fixed values.

use secrecy::SecretString;
use tracing::debug;

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variables checked (in order) for a GitHub token.
pub const GITHUB_TOKEN_ENVS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Provides GitHub and Gemini credentials for API calls.
///
/// Implementations return `None` when a credential is not available.
pub trait CredentialProvider: Send + Sync {
    /// Retrieves the GitHub API token. Anonymous access is used when absent.
    fn github_token(&self) -> Option<SecretString>;

    /// Retrieves the Gemini API key.
    fn gemini_key(&self) -> Option<SecretString>;
}

/// Resolves credentials from environment variables.
///
/// - GitHub: `GITHUB_TOKEN`, then `GH_TOKEN`
/// - Gemini: `GEMINI_API_KEY`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

fn non_empty_env(name: &str) -> Option<SecretString> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

impl CredentialProvider for EnvCredentials {
    fn github_token(&self) -> Option<SecretString> {
        let token = GITHUB_TOKEN_ENVS.iter().find_map(|name| non_empty_env(name));
        if token.is_some() {
            debug!("Resolved GitHub token from environment variable");
        } else {
            debug!("No GitHub token found, using anonymous access");
        }
        token
    }

    fn gemini_key(&self) -> Option<SecretString> {
        let key = non_empty_env(GEMINI_API_KEY_ENV);
        if key.is_none() {
            debug!("No Gemini API key found in environment");
        }
        key
    }
}

/// Fixed credentials, useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    /// GitHub token, if any.
    pub github_token: Option<SecretString>,
    /// Gemini API key, if any.
    pub gemini_key: Option<SecretString>,
}

impl CredentialProvider for StaticCredentials {
    fn github_token(&self) -> Option<SecretString> {
        self.github_token.clone()
    }

    fn gemini_key(&self) -> Option<SecretString> {
        self.gemini_key.clone()
    }
}
