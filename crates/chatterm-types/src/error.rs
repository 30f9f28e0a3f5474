//! Error taxonomy for chatterm.
//!
//! Gateway errors are recoverable per turn; config errors abort startup;
//! seed errors become a note shown in place of the first reply.

use thiserror::Error;

/// The first field of a chat-completions reply that failed validation.
///
/// Checks run in order (object, `choices`, `message`, `content`) and each
/// one assumes the previous ones passed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response body is not a JSON object")]
    NotAnObject,

    #[error("response has no `choices` list")]
    MissingChoices,

    #[error("response `choices` list is empty")]
    EmptyChoices,

    #[error("first choice has no `message`")]
    MissingMessage,

    #[error("first choice `message` has no textual `content`")]
    MissingContent,
}

/// Errors from a single completion gateway call.
///
/// Every variant is recoverable at the turn level: the session shows it as
/// the reply text and keeps going.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {message}")]
    Transport { message: String },

    #[error("authentication failed (HTTP {status}){}", detail(.body))]
    AuthenticationFailed { status: u16, body: String },

    #[error("rate limited (HTTP {status}){}", detail(.body))]
    RateLimited { status: u16, body: String },

    #[error("HTTP {status}{}", detail(.body))]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] MalformedResponse),
}

impl GatewayError {
    /// HTTP status carried by the error, if the endpoint answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::AuthenticationFailed { status, .. }
            | GatewayError::RateLimited { status, .. }
            | GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Transport { .. } | GatewayError::Malformed(_) => None,
        }
    }
}

/// `": {body}"`, or nothing when the endpoint sent no body.
fn detail(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// Fatal configuration errors, raised before the session loop starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no API key provided: pass --api-key-prompt, set CHATTERM_API_KEY or OPENAI_API_TOKEN, or add api_key to {config_path}"
    )]
    MissingCredential { config_path: String },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Errors while retrieving seed context (man page, help output, file).
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("no file was found at {path}")]
    FileNotFound { path: String },

    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("no man page entry exists for {program}")]
    NoManPage { program: String },

    #[error("{program} could not be executed with the '-h' flag")]
    HelpUnavailable { program: String },

    #[error("the man page functionality is not available on this platform")]
    Unsupported,
}
