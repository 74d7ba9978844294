// SPDX-License-Identifier: Apache-2.0

//! HTTP service exposing IssueLens issue analysis.
//!
//! Routes:
//! - `POST /analyze-issue` with `{"repo_url": ..., "issue_number": ...}`
//! - `GET /health`

pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use issuelens_core::{Analyzer, AppConfig, CredentialProvider};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody};
pub use routes::{AnalyzeRequest, HealthResponse};

/// Shared state for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pipeline shared by all requests.
    pub analyzer: Arc<Analyzer>,
    /// Model name reported by `/health`.
    pub model: Arc<str>,
}

impl AppState {
    /// Creates handler state around an analyzer.
    pub fn new(analyzer: Analyzer, model: impl Into<Arc<str>>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            model: model.into(),
        }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze-issue", post(routes::analyze_issue))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Resolves `host:port`, bracketing bare IPv6 addresses.
fn socket_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let addr = if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    };
    Ok(addr.parse()?)
}

/// Run the HTTP server.
///
/// Builds the analyzer from `config` and `credentials`, binds
/// `config.server.host:config.server.port`, and shuts down gracefully on
/// Ctrl+C.
///
/// # Errors
///
/// Returns an error if the analyzer cannot be built (e.g. missing Gemini
/// key) or the address cannot be bound.
pub async fn run_http(
    config: &AppConfig,
    credentials: &dyn CredentialProvider,
) -> anyhow::Result<()> {
    let analyzer = Analyzer::from_config(config, credentials)?;
    let router = build_router(AppState::new(analyzer, config.ai.model.as_str()));

    let addr = socket_addr(&config.server.host, config.server.port)?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(model = %config.ai.model, "HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_ipv4() {
        let addr = socket_addr("127.0.0.1", 8000).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8000");
    }

    #[test]
    fn socket_addr_ipv6() {
        let addr = socket_addr("::1", 8000).unwrap();
        assert_eq!(addr.to_string(), "[::1]:8000");
    }

    #[test]
    fn socket_addr_rejects_garbage() {
        assert!(socket_addr("not an address", 1).is_err());
    }
}
