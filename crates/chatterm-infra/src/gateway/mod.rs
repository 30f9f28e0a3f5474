//! OpenAiCompatGateway -- concrete [`CompletionGateway`] for any
//! OpenAI-compatible chat-completions endpoint.
//!
//! Sends `POST {base_url}/chat/completions` with bearer authentication and
//! the full transcript as `messages`. One attempt per call: no retry, no
//! request timeout.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod validate;

use secrecy::{ExposeSecret, SecretString};

use chatterm_core::gateway::CompletionGateway;
use chatterm_types::config::SessionConfig;
use chatterm_types::error::{GatewayError, MalformedResponse};
use chatterm_types::wire::{ChatCompletionRequest, ModelList, PendingRequest};

use self::validate::extract_reply;

/// Chat-completions client for OpenAI and compatible gateways.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// building the `Authorization` header. The type does not derive `Debug`.
pub struct OpenAiCompatGateway {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiCompatGateway {
    /// Create a gateway for the endpoint and credential in `config`.
    pub fn new(config: &SessionConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("chatterm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Transport {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key: SecretString::from(config.api_key.expose_secret().to_owned()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List the model identifiers the endpoint offers (`GET /models`).
    pub async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let url = self.url("/models");
        tracing::debug!(%url, "listing models");

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                message: format!("HTTP request failed: {e}"),
            })?;

        let body = checked_body(response).await?;
        let list: ModelList = serde_json::from_str(&body)
            .map_err(|e| MalformedResponse::InvalidJson(e.to_string()))?;

        Ok(list.data.into_iter().map(|entry| entry.id).collect())
    }
}

/// Read the body of a response, turning non-2xx statuses into errors.
async fn checked_body(response: reqwest::Response) -> Result<String, GatewayError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| GatewayError::Transport {
        message: format!("failed to read response body: {e}"),
    })?;

    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), "endpoint returned an error status");
        return Err(match status.as_u16() {
            401 => GatewayError::AuthenticationFailed { status: 401, body },
            429 => GatewayError::RateLimited { status: 429, body },
            code => GatewayError::Status { status: code, body },
        });
    }

    Ok(body)
}

impl CompletionGateway for OpenAiCompatGateway {
    fn name(&self) -> &str {
        "openai-compat"
    }

    async fn complete(&self, request: PendingRequest<'_>) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest::from(request);
        let url = self.url("/chat/completions");
        tracing::debug!(%url, model = body.model, messages = body.messages.len(), "chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                message: format!("HTTP request failed: {e}"),
            })?;

        let text = checked_body(response).await?;
        Ok(extract_reply(&text)?)
    }
}
