//! Layered configuration resolution.
//!
//! Each setting is looked up in a fixed precedence list of layers
//! (command-line flag, environment, config file, built-in default); the
//! first layer holding a non-empty value wins. Resolution is a pure
//! function of its inputs: reading the environment and the config file is
//! done by the caller (see `chatterm_infra::credential` and
//! `chatterm_infra::config`).

use secrecy::SecretString;

use chatterm_types::config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, FileConfig, SessionConfig,
};
use chatterm_types::error::ConfigError;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Prompt,
    Env(&'static str),
    File,
    Default,
}

/// One candidate value in a precedence list.
#[derive(Debug, Clone)]
pub struct Layer<T> {
    pub source: Source,
    pub value: Option<T>,
}

impl<T> Layer<T> {
    pub fn new(source: Source, value: Option<T>) -> Self {
        Self { source, value }
    }
}

/// A value together with the layer that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

/// Return the first layer that holds a value.
pub fn resolve_layered<T>(layers: impl IntoIterator<Item = Layer<T>>) -> Option<Resolved<T>> {
    layers.into_iter().find_map(|layer| {
        layer.value.map(|value| Resolved {
            value,
            source: layer.source,
        })
    })
}

/// Treat blank strings (e.g. `OPENAI_API_TOKEN=""`) as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Values given on the command line. The API key only ever comes from the
/// hidden startup prompt.
#[derive(Debug, Clone, Default)]
pub struct FlagValues {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub system_prompt: Option<String>,
}

/// Environment variables relevant to chatterm, already read.
#[derive(Debug, Clone, Default)]
pub struct EnvValues {
    pub chatterm_api_key: Option<String>,
    pub openai_api_token: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub chatterm_model: Option<String>,
}

/// Everything resolution needs.
#[derive(Debug, Clone, Default)]
pub struct ConfigInputs {
    pub flags: FlagValues,
    pub env: EnvValues,
    pub file: FileConfig,
    /// Shown in the missing-credential error.
    pub config_path: String,
}

/// Resolve the session configuration.
///
/// Precedence:
/// - API key: startup prompt, `CHATTERM_API_KEY`, `OPENAI_API_TOKEN`,
///   `OPENAI_API_KEY`, config file. No default: a missing key is fatal.
/// - Base URL: flag, `OPENAI_BASE_URL`, config file, [`DEFAULT_BASE_URL`].
/// - Model: flag, `CHATTERM_MODEL`, config file, [`DEFAULT_MODEL`].
/// - Temperature: flag, config file, [`DEFAULT_TEMPERATURE`].
/// - System prompt: flag, config file, none.
pub fn resolve_session_config(inputs: ConfigInputs) -> Result<SessionConfig, ConfigError> {
    let ConfigInputs {
        flags,
        env,
        file,
        config_path,
    } = inputs;

    let api_key = resolve_layered([
        Layer::new(Source::Prompt, non_empty(flags.api_key)),
        Layer::new(Source::Env("CHATTERM_API_KEY"), non_empty(env.chatterm_api_key)),
        Layer::new(Source::Env("OPENAI_API_TOKEN"), non_empty(env.openai_api_token)),
        Layer::new(Source::Env("OPENAI_API_KEY"), non_empty(env.openai_api_key)),
        Layer::new(Source::File, non_empty(file.api_key)),
    ])
    .ok_or(ConfigError::MissingCredential { config_path })?;
    tracing::debug!(source = ?api_key.source, "resolved API key");

    let base_url = resolve_layered([
        Layer::new(Source::Flag, non_empty(flags.base_url)),
        Layer::new(Source::Env("OPENAI_BASE_URL"), non_empty(env.openai_base_url)),
        Layer::new(Source::File, non_empty(file.base_url)),
        Layer::new(Source::Default, Some(DEFAULT_BASE_URL.to_string())),
    ])
    .map(|r| r.value)
    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = normalize_base_url(&base_url)?;

    let model = resolve_layered([
        Layer::new(Source::Flag, non_empty(flags.model)),
        Layer::new(Source::Env("CHATTERM_MODEL"), non_empty(env.chatterm_model)),
        Layer::new(Source::File, non_empty(file.model)),
        Layer::new(Source::Default, Some(DEFAULT_MODEL.to_string())),
    ])
    .map(|r| r.value)
    .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let temperature = resolve_layered([
        Layer::new(Source::Flag, flags.temperature),
        Layer::new(Source::File, file.temperature),
        Layer::new(Source::Default, Some(DEFAULT_TEMPERATURE)),
    ])
    .map(|r| r.value);

    let system_prompt = resolve_layered([
        Layer::new(Source::Flag, non_empty(flags.system_prompt)),
        Layer::new(Source::File, non_empty(file.system_prompt)),
    ])
    .map(|r| r.value);

    Ok(SessionConfig {
        base_url,
        api_key: SecretString::from(api_key.value),
        model,
        temperature,
        system_prompt,
    })
}

/// Require an http(s) scheme and strip trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(trimmed.to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
