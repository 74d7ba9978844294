// SPDX-License-Identifier: Apache-2.0

//! Request handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use issuelens_core::{AnalysisResult, IssueLensError};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

/// Body of `POST /analyze-issue`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Repository URL, e.g. `https://github.com/owner/repo`.
    pub repo_url: String,
    /// Issue number within the repository.
    pub issue_number: u64,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the service is up.
    pub status: String,
    /// Configured model name.
    pub model: String,
}

/// Analyzes a single GitHub issue.
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn analyze_issue(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(status = rejection.status().as_u16(), "Rejected request body");
        IssueLensError::invalid_input(rejection.body_text())
    })?;
    info!(
        repo_url = %request.repo_url,
        issue_number = request.issue_number,
        "Analyze request received"
    );
    let analysis = state
        .analyzer
        .analyze(&request.repo_url, request.issue_number)
        .await?;
    Ok(Json(analysis))
}

/// Reports liveness and the configured model.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model.to_string(),
    })
}
