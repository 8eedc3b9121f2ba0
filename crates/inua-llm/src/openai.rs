//! OpenAI-compatible chat-completions client.
//!
//! Non-streaming `POST {base_url}/chat/completions` against any
//! OpenAI-wire-compatible inference endpoint. Every call runs under a
//! caller-imposed deadline; a hung upstream degrades into
//! [`ProviderError::Timeout`] instead of stalling the request.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::provider::{CompletionProvider, CompletionRequest, ProviderError, ProviderResult};

/// Configuration for an OpenAI-compatible endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiCompatConfig {
    /// API root, e.g. `https://api.intelligence.io.solutions/api/v1`.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Per-call deadline.
    pub timeout: Duration,
}

impl OpenAiCompatConfig {
    /// Config with the default 20-second deadline.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: Duration::from_secs(20),
        }
    }

    /// Override the per-call deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Deserialize)]
struct WireResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`CompletionProvider`] over an OpenAI-compatible HTTP endpoint.
pub struct OpenAiCompatProvider {
    config: OpenAiCompatConfig,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a provider with its own HTTP client.
    #[must_use]
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> ProviderResult<String> {
        let body = WireRequest {
            model: &self.config.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: &request.system,
                },
                WireMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model = %self.config.model, "sending completion request");

        let send = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send();

        let response = tokio::time::timeout(self.config.timeout, send)
            .await
            .map_err(|_| ProviderError::Timeout {
                elapsed_ms: u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
            })??;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let message = message.chars().take(500).collect::<String>();
            metrics::counter!("model_call_failures_total", "kind" => "api").increment(1);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
                retryable: status.as_u16() == 429 || status.is_server_error(),
            });
        }

        let parsed: WireResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyCompletion {
                message: "response carried no text content".into(),
            })?;

        Ok(content)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiCompatProvider {
        OpenAiCompatProvider::new(
            OpenAiCompatConfig::new(server.uri(), "test-key", "test-model")
                .with_timeout(Duration::from_millis(500)),
        )
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
    }

    #[tokio::test]
    async fn sends_system_and_user_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": "instructions"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{\"ok\":1}")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let reply = provider
            .complete(&CompletionRequest::new("instructions", "hello"))
            .await
            .unwrap();
        assert_eq!(reply, "{\"ok\":1}");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .complete(&CompletionRequest::new("s", "u"))
            .await
            .unwrap_err();
        match err {
            ProviderError::Api {
                status, retryable, ..
            } => {
                assert_eq!(status, 429);
                assert!(retryable);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_error_status_is_not_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .complete(&CompletionRequest::new("s", "u"))
            .await
            .unwrap_err();
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn missing_content_maps_to_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .complete(&CompletionRequest::new("s", "u"))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "empty");
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("late"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .complete(&CompletionRequest::new("s", "u"))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(
            err,
            ProviderError::Timeout { .. } | ProviderError::Http(_)
        ));
    }

    #[tokio::test]
    async fn temperature_and_max_tokens_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "temperature": 0.3,
                "max_tokens": 512
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let reply = provider
            .complete(
                &CompletionRequest::new("s", "u")
                    .with_temperature(0.3)
                    .with_max_tokens(512),
            )
            .await
            .unwrap();
        assert_eq!(reply, "ok");
    }
}
