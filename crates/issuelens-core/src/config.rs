// SPDX-License-Identifier: Apache-2.0

//! Configuration management for IssueLens.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Legacy environment variables `GEMINI_MODEL` and `GEMINI_API_VERSION`
//! 2. Environment variables (prefix: `ISSUELENS_`)
//! 3. Config file: `~/.config/issuelens/config.toml`
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Override the Gemini model via environment variable
//! ISSUELENS_AI__MODEL=gemini-2.5-flash issuelens analyze https://github.com/owner/repo 42
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::IssueLensError;

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default GitHub REST endpoint.
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model provider settings.
    pub ai: AiConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

/// Model provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Gemini model identifier.
    pub model: String,
    /// Gemini API version path segment (e.g., `v1beta`).
    pub api_version: String,
    /// Base URL of the Gemini API.
    pub api_base_url: String,
    /// Sampling temperature. Kept low for stable classification.
    pub temperature: f32,
    /// Output token cap. The expected reply is a small JSON object.
    pub max_output_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// How many repair round-trips to attempt after an invalid reply.
    pub repair_attempts: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            api_version: "v1beta".to_string(),
            api_base_url: DEFAULT_GEMINI_API_BASE.to_string(),
            temperature: 0.4,
            max_output_tokens: 512,
            timeout_seconds: 25,
            repair_attempts: 1,
        }
    }
}

impl AiConfig {
    /// Full `generateContent` endpoint for the configured model and version.
    #[must_use]
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            self.api_version,
            self.model
        )
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the GitHub REST API.
    pub api_base_url: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_GITHUB_API_BASE.to_string(),
            api_timeout_seconds: 10,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Returns the IssueLens configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/issuelens`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("issuelens");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("issuelens")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration from the default file location.
///
/// Environment variables use the prefix `ISSUELENS_` and double underscore
/// for nested keys (e.g., `ISSUELENS_AI__MODEL`).
///
/// # Errors
///
/// Returns `IssueLensError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, IssueLensError> {
    load_config_from(&config_file_path())
}

/// Load application configuration from an explicit file path.
///
/// The file is optional; a missing file yields the defaults plus any
/// environment overrides.
///
/// # Errors
///
/// Returns `IssueLensError::Config` if the file exists but is invalid.
pub fn load_config_from(path: &Path) -> Result<AppConfig, IssueLensError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("ISSUELENS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("ai.model", non_empty_env("GEMINI_MODEL"))?
        .set_override_option("ai.api_version", non_empty_env("GEMINI_API_VERSION"))?
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
