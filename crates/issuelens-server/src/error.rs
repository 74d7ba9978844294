// SPDX-License-Identifier: Apache-2.0

//! Error conversion from issuelens-core errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use issuelens_core::IssueLensError;
use serde::Serialize;

/// JSON body returned for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub detail: String,
    /// Machine-readable error category.
    pub category: &'static str,
}

/// Wrapper that renders an `IssueLensError` as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub IssueLensError);

impl From<IssueLensError> for ApiError {
    fn from(err: IssueLensError) -> Self {
        ApiError(err)
    }
}

/// Maps an error to its HTTP status code.
///
/// - `InvalidInput` -> 400
/// - `NotFound` -> 404
/// - `AccessDenied` -> 403
/// - `Upstream` -> 502
/// - `MalformedOutput`, `MissingApiKey`, `Config` -> 500
#[must_use]
pub fn status_for(err: &IssueLensError) -> StatusCode {
    match err {
        IssueLensError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        IssueLensError::NotFound => StatusCode::NOT_FOUND,
        IssueLensError::AccessDenied => StatusCode::FORBIDDEN,
        IssueLensError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        IssueLensError::MalformedOutput
        | IssueLensError::MissingApiKey { .. }
        | IssueLensError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.0.to_string(),
            category: self.0.category(),
        };
        (status_for(&self.0), Json(body)).into_response()
    }
}
