//! # Provider Trait
//!
//! Core abstraction over the external language model. The pipeline
//! treats the model as an opaque function from system instructions plus
//! user text to raw text that may fail; everything else (JSON
//! extraction, validation, fallback) happens on this side of the seam.

use async_trait::async_trait;

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur during a completion call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider returned an API error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
        /// Whether this error can be retried.
        retryable: bool,
    },

    /// The call exceeded the caller-imposed deadline.
    #[error("Timed out after {elapsed_ms}ms")]
    Timeout {
        /// Milliseconds waited before giving up.
        elapsed_ms: u64,
    },

    /// The reply carried no usable text content.
    #[error("Empty completion: {message}")]
    EmptyCompletion {
        /// Error description.
        message: String,
    },

    /// Provider-specific error.
    #[error("{message}")]
    Other {
        /// Error description.
        message: String,
    },
}

impl ProviderError {
    /// Whether this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| {
                        s == reqwest::StatusCode::TOO_MANY_REQUESTS || s.is_server_error()
                    })
            }
            Self::Api { retryable, .. } => *retryable,
            Self::Timeout { .. } => true,
            Self::Json(_) | Self::EmptyCompletion { .. } | Self::Other { .. } => false,
        }
    }

    /// Error category string for event emission.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Http(_) => "network",
            Self::Json(_) => "parse",
            Self::Api { .. } => "api",
            Self::Timeout { .. } => "timeout",
            Self::EmptyCompletion { .. } => "empty",
            Self::Other { .. } => "unknown",
        }
    }
}

/// One completion request: fixed instructions plus sanitized user text.
#[derive(Clone, Debug, Default)]
pub struct CompletionRequest {
    /// System instructions.
    pub system: String,
    /// User message.
    pub user: String,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Build a request from instructions and user text.
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the generation cap.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Opaque completion backend.
///
/// Implementors must be `Send + Sync`; the pipeline shares one instance
/// across requests. A call may suspend, fail, or time out; callers own
/// the degradation policy and never let a provider error escape to the
/// user.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Model identifier used for this provider.
    fn model(&self) -> &str;

    /// Run one completion to completion (non-streaming).
    async fn complete(&self, request: &CompletionRequest) -> ProviderResult<String>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
