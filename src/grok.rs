//! Client for the xAI chat completions API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::Message;

/// Base host for the completions endpoint.
pub const BASE_URL: &str = "https://api.x.ai/v1";

/// Model used when neither the CLI nor the config file names one.
pub const DEFAULT_MODEL: &str = "grok-3";

/// The API itself does not mandate a timeout; without one a stalled
/// connection would hang the request forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum GrokError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("API error {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

/// Stateless client: one POST per completion, no retries. The first failure
/// is surfaced to the caller.
#[derive(Clone)]
pub struct GrokClient {
    http: Client,
    base_url: String,
}

impl GrokClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(base_url: &str) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send `messages` to the completions endpoint and return the message of
    /// the first choice. The caller is responsible for validating the API
    /// key before calling.
    pub async fn complete(
        &self,
        api_key: &str,
        messages: &[Message],
        model: &str,
    ) -> Result<Message, GrokError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest { model, messages };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(GrokError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GrokError::Http { status, body });
        }

        let body = response.text().await.map_err(GrokError::Network)?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| GrokError::Decode(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| GrokError::Decode("response contained no choices".to_string()))
    }
}

impl Default for GrokClient {
    fn default() -> Self {
        Self::new()
    }
}
