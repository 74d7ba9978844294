// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.

use issuelens_core::AnalysisResult;
use serde::Serialize;

/// Result of `issuelens analyze`.
///
/// Serializes as the bare analysis object; the issue reference is only
/// used for the text header.
#[derive(Debug, Serialize)]
pub struct AnalyzeResult {
    /// Repository URL as given on the command line.
    #[serde(skip)]
    pub repo_url: String,
    /// Issue number.
    #[serde(skip)]
    pub issue_number: u64,
    /// Model output.
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}
