//! Request/response shapes for OpenAI-compatible chat-completions endpoints.
//!
//! Only the request side is strongly typed. Reply bodies are validated
//! field by field (see `chatterm_infra::gateway::validate`) so that a
//! malformed reply can be reported by the first field that is missing.

use serde::{Deserialize, Serialize};

use crate::transcript::Turn;

/// One gateway call: the transcript snapshot plus the model to run it on.
///
/// Borrowed from the session for the duration of the call only.
#[derive(Debug, Clone, Copy)]
pub struct PendingRequest<'a> {
    pub model: &'a str,
    pub turns: &'a [Turn],
    pub temperature: Option<f32>,
}

/// Body of `POST {base_url}/chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Turn],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl<'a> From<PendingRequest<'a>> for ChatCompletionRequest<'a> {
    fn from(request: PendingRequest<'a>) -> Self {
        Self {
            model: request.model,
            messages: request.turns,
            temperature: request.temperature,
        }
    }
}

/// Body of `GET {base_url}/models`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

/// A single entry of a model listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub id: String,
}
