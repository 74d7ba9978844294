// SPDX-License-Identifier: Apache-2.0

//! GitHub issue fetching.
//!
//! Fetches an issue and its comment thread over the REST API and normalizes
//! them into an [`IssueRecord`].

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::ai::types::IssueRecord;
use crate::auth::CredentialProvider;
use crate::config::GitHubConfig;
use crate::error::IssueLensError;

const SERVICE: &str = "GitHub";

/// Media type recommended by the GitHub REST API.
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// User agent sent with every request (GitHub rejects requests without one).
const CLIENT_USER_AGENT: &str = concat!("issuelens/", env!("CARGO_PKG_VERSION"));

/// Issue fields consumed from `GET /repos/{owner}/{repo}/issues/{n}`.
#[derive(Debug, Deserialize)]
struct IssueResponse {
    #[serde(default)]
    title: String,
    body: Option<String>,
}

/// Comment fields consumed from the comments endpoint.
#[derive(Debug, Deserialize)]
struct CommentResponse {
    body: Option<String>,
}

/// GitHub REST client for reading issues.
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Creates a client, authenticating with `token` when present.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: &GitHubConfig, token: Option<SecretString>) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .build()
            .map_err(|e| IssueLensError::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Creates a client using the GitHub token from `credentials`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn from_credentials(
        config: &GitHubConfig,
        credentials: &dyn CredentialProvider,
    ) -> crate::Result<Self> {
        Self::new(config, credentials.github_token())
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.http.get(format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Fetches an issue with its comments.
    ///
    /// The comment lookup is best-effort: any failure there yields an
    /// empty comment list instead of an error.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (404), `AccessDenied` (403/429), or `Upstream`
    /// for any other failure of the issue lookup.
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, number = number))]
    pub async fn fetch_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> crate::Result<IssueRecord> {
        debug!("Fetching issue details");

        let response = self
            .get(&format!("/repos/{owner}/{repo}/issues/{number}"))
            .send()
            .await
            .map_err(|e| {
                IssueLensError::upstream(
                    SERVICE,
                    format!("request failed: {}", e.without_url()),
                    None,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        let issue: IssueResponse = response.json().await.map_err(|e| {
            IssueLensError::upstream(
                SERVICE,
                format!("unparseable issue: {}", e.without_url()),
                Some(status.as_u16()),
            )
        })?;

        let comments = self.fetch_comments(owner, repo, number).await;
        debug!(comment_count = comments.len(), "Fetched issue");

        Ok(IssueRecord::builder()
            .title(issue.title)
            .body(issue.body.unwrap_or_default())
            .comments(comments)
            .build())
    }

    async fn fetch_comments(&self, owner: &str, repo: &str, number: u64) -> Vec<String> {
        let response = match self
            .get(&format!("/repos/{owner}/{repo}/issues/{number}/comments"))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e.without_url(), "Failed to fetch comments, continuing without them");
                return Vec::new();
            }
        };

        if response.status() != StatusCode::OK {
            warn!(
                status = response.status().as_u16(),
                "Comments request failed, continuing without them"
            );
            return Vec::new();
        }

        match response.json::<Vec<CommentResponse>>().await {
            Ok(comments) => comments
                .into_iter()
                .map(|c| c.body.unwrap_or_default())
                .collect(),
            Err(e) => {
                warn!(error = %e.without_url(), "Unparseable comments, continuing without them");
                Vec::new()
            }
        }
    }
}

/// Maps a failed issue lookup to an error.
fn status_error(status: StatusCode, body: String) -> IssueLensError {
    match status {
        StatusCode::NOT_FOUND => IssueLensError::NotFound,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => IssueLensError::AccessDenied,
        _ => IssueLensError::upstream(SERVICE, body, Some(status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, String::new()),
            IssueLensError::NotFound
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, String::new()),
            IssueLensError::AccessDenied
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            IssueLensError::AccessDenied
        ));

        let err = status_error(StatusCode::BAD_GATEWAY, "bad gateway".to_string());
        match err {
            IssueLensError::Upstream {
                service,
                message,
                status,
            } => {
                assert_eq!(service, "GitHub");
                assert_eq!(message, "bad gateway");
                assert_eq!(status, Some(502));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_issue_response_null_body() {
        let issue: IssueResponse =
            serde_json::from_str(r#"{"title":"T","body":null,"number":1}"#).unwrap();
        assert_eq!(issue.title, "T");
        assert!(issue.body.is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let client = GitHubClient::new(
            &GitHubConfig::default(),
            Some(SecretString::from("ghp_secret")),
        )
        .unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("authenticated: true"));
    }

    #[tokio::test]
    async fn test_comments_transport_failure_yields_empty() {
        let client = GitHubClient::new(
            &GitHubConfig {
                api_base_url: "http://127.0.0.1:9".to_string(),
                api_timeout_seconds: 1,
            },
            None,
        )
        .unwrap();

        let comments = client.fetch_comments("foo", "bar", 5).await;
        assert!(comments.is_empty());
    }
}
