// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # IssueLens Core
//!
//! Core library for IssueLens - AI-assisted GitHub issue analysis.
//!
//! This crate provides reusable components for:
//! - Parsing GitHub repository URLs
//! - Fetching issues and comments over the GitHub REST API
//! - Building the analysis prompt
//! - Calling Gemini and extracting the structured JSON reply
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use issuelens_core::{Analyzer, EnvCredentials, load_config};
//!
//! # async fn example() -> issuelens_core::Result<()> {
//! let config = load_config()?;
//! let analyzer = Analyzer::from_config(&config, &EnvCredentials)?;
//!
//! let analysis = analyzer
//!     .analyze("https://github.com/rust-lang/rust", 1)
//!     .await?;
//! println!("Summary: {}", analysis.summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ai`] - Gemini client, prompt builder, JSON extraction
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - Repository URL parsing and issue fetching
//! - [`pipeline`] - End-to-end analysis orchestration

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{CredentialProvider, EnvCredentials, StaticCredentials};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{IssueLensError, MALFORMED_OUTPUT_MESSAGE};

/// Convenience Result type for IssueLens operations.
///
/// This is equivalent to `std::result::Result<T, IssueLensError>`.
pub type Result<T> = std::result::Result<T, IssueLensError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AiConfig, AppConfig, GitHubConfig, ServerConfig, config_dir, config_file_path, load_config,
    load_config_from,
};

// ============================================================================
// AI Analysis
// ============================================================================

pub use ai::{
    AiProvider, AnalysisResult, GeminiClient, IssueRecord, IssueType, PromptMessage, build_prompt,
};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::{GitHubClient, parse_repo_url};

// ============================================================================
// Pipeline
// ============================================================================

pub use pipeline::{Analyzer, PipelineStage};

// ============================================================================
// Modules
// ============================================================================

pub mod ai;
pub mod auth;
pub mod config;
pub mod error;
pub mod github;
pub mod pipeline;
