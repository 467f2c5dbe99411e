//! Search intent API client
//!
//! Performs the single outbound lookup behind the `search_intent_analysis`
//! tool and folds every failure into a [`FetchError`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::intent::{ApiEnvelope, IntentResult};

/// Failure outcome of a single analysis call
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a non-2xx status
    #[error("API request failed: {status}")]
    Transport { status: StatusCode },

    /// The API answered 2xx but reported a logical failure
    #[error("API error: {message}")]
    Api { code: i64, message: String },

    /// Anything else: network failures, timeouts, malformed bodies
    #[error("{message}")]
    Unknown {
        kind: Option<&'static str>,
        message: String,
    },
}

impl FetchError {
    /// Classification label reported to the caller as `errorType`
    pub fn error_type(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "TransportError",
            FetchError::Api { .. } => "ApiError",
            FetchError::Unknown { kind, .. } => kind.unwrap_or("Unknown"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            Some("TimeoutError")
        } else if err.is_decode() || err.is_body() {
            Some("DecodeError")
        } else if err.is_connect() || err.is_request() {
            Some("NetworkError")
        } else {
            None
        };
        FetchError::Unknown {
            kind,
            message: format!("request failed: {}", err),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Unknown {
            kind: Some("DecodeError"),
            message: format!("invalid response body: {}", err),
        }
    }
}

/// Something that can classify the intent behind a search query
#[async_trait]
pub trait IntentAnalyzer: Send + Sync {
    async fn analyze(&self, query: &str) -> Result<IntentResult, FetchError>;
}

/// HTTP client for the search intent API
///
/// Holds the bearer credential, so it must not implement `Debug`.
#[derive(Clone)]
pub struct IntentClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl IntentClient {
    /// Create a client from resolved configuration
    pub fn new(config: &Config) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("search-intent-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key().to_string(),
        })
    }
}

#[async_trait]
impl IntentAnalyzer for IntentClient {
    async fn analyze(&self, query: &str) -> Result<IntentResult, FetchError> {
        debug!(url = %self.api_url, "Requesting search intent");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport { status });
        }

        let body = response.bytes().await?;
        let envelope: ApiEnvelope = serde_json::from_slice(&body)?;

        if envelope.code != 0 {
            return Err(FetchError::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }

        envelope
            .data
            .map(IntentResult::from)
            .ok_or_else(|| FetchError::Unknown {
                kind: Some("DecodeError"),
                message: "API response did not include data".to_string(),
            })
    }
}
