// SPDX-License-Identifier: Apache-2.0

//! Google AI Studio (Gemini) API client for issue analysis.
//!
//! Talks to the native `generateContent` endpoint. The API key travels as
//! the `key` query parameter and is never logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::provider::AiProvider;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, PromptMessage,
};
use crate::auth::{CredentialProvider, GEMINI_API_KEY_ENV};
use crate::config::AiConfig;
use crate::error::IssueLensError;

const SERVICE: &str = "Gemini API";

/// Google AI Studio (Gemini) API client.
///
/// Holds HTTP client, API key, and model configuration for reuse across
/// multiple requests. Enables connection pooling.
pub struct GeminiClient {
    /// HTTP client with configured timeout.
    http: Client,
    /// API key for Gemini authentication.
    api_key: SecretString,
    /// Fully resolved `generateContent` URL.
    endpoint: String,
    /// Model name (e.g., "gemini-2.0-flash").
    model: String,
    /// Sampling parameters sent with every request.
    generation: GenerationConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a new Gemini client, resolving the API key from `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no Gemini API key is available
    /// - HTTP client creation fails
    pub fn new(config: &AiConfig, credentials: &dyn CredentialProvider) -> crate::Result<Self> {
        let api_key = credentials
            .gemini_key()
            .ok_or_else(|| IssueLensError::MissingApiKey {
                env_var: GEMINI_API_KEY_ENV.to_string(),
            })?;
        Self::with_api_key(api_key, config)
    }

    /// Creates a new Gemini client with a provided API key.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn with_api_key(api_key: SecretString, config: &AiConfig) -> crate::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| IssueLensError::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_key,
            endpoint: config.generate_content_url(),
            model: config.model.clone(),
            generation: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
        })
    }

    fn build_request(&self, messages: &[PromptMessage]) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: messages.iter().map(Content::from).collect(),
            generation_config: self.generation.clone(),
        }
    }
}

#[async_trait]
impl AiProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip_all, fields(model = %self.model, messages = messages.len()))]
    async fn generate(&self, messages: &[PromptMessage]) -> crate::Result<String> {
        debug!("Calling Gemini API");
        let request = self.build_request(messages);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&request)
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
        if status != reqwest::StatusCode::OK {
            let error_body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Gemini API returned an error");
            return Err(IssueLensError::upstream(
                SERVICE,
                error_body,
                Some(status.as_u16()),
            ));
        }

        let completion: GenerateContentResponse = response.json().await.map_err(|e| {
            IssueLensError::upstream(
                SERVICE,
                format!("unparseable response: {}", e.without_url()),
                Some(status.as_u16()),
            )
        })?;

        let text = completion
            .first_text()
            .ok_or_else(|| IssueLensError::upstream(SERVICE, "no usable response", None))?;

        debug!(response_length = text.len(), "Received model response");
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AiConfig {
        AiConfig {
            api_base_url: "http://localhost:9".to_string(),
            ..AiConfig::default()
        }
    }

    struct NoKeys;

    impl CredentialProvider for NoKeys {
        fn github_token(&self) -> Option<SecretString> {
            None
        }

        fn gemini_key(&self) -> Option<SecretString> {
            None
        }
    }

    #[test]
    fn test_missing_api_key_error() {
        let err = GeminiClient::new(&test_config(), &NoKeys).expect_err("should fail");
        assert!(matches!(err, IssueLensError::MissingApiKey { .. }));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_build_request_embeds_messages_and_policy() {
        let client = GeminiClient::with_api_key(SecretString::from("k"), &test_config())
            .expect("client");
        let request = client.build_request(&[
            PromptMessage::user("analyze"),
            PromptMessage::user("fix it"),
        ]);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["contents"][1]["parts"][0]["text"], "fix it");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 512);
        let temperature = value["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client =
            GeminiClient::with_api_key(SecretString::from("super-secret"), &test_config())
                .expect("client");
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("gemini-2.0-flash"));
    }
}
