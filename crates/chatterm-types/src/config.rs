//! Configuration types for chatterm.
//!
//! `FileConfig` mirrors the optional `config.toml` in the chatterm home
//! directory. `SessionConfig` is the fully resolved, read-only view the
//! session engine is started with.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Endpoint used when neither a flag, the environment, nor the config file
/// names one.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Bearer credential for the endpoint.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API (e.g. a self-hosted gateway).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model identifier.
    #[serde(default)]
    pub model: Option<String>,

    /// Sampling temperature.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// System prompt placed as the first turn of every conversation.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Resolved configuration for one session.
///
/// Does not derive `Clone`; the credential stays in one place and only
/// its redacted `Debug` form can be printed.
#[derive(Debug)]
pub struct SessionConfig {
    pub base_url: String,
    pub api_key: SecretString,
    pub model: String,
    pub temperature: Option<f32>,
    pub system_prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_file_config_empty_toml() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_file_config_with_values() {
        let toml_str = r#"
api_key = "sk-test"
base_url = "http://localhost:8080/v1"
model = "llama3"
temperature = 0.2
system_prompt = "Answer in one sentence."
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(config.model.as_deref(), Some("llama3"));
        assert!((config.temperature.unwrap() - 0.2).abs() < f32::EPSILON);
        assert_eq!(
            config.system_prompt.as_deref(),
            Some("Answer in one sentence.")
        );
    }

    #[test]
    fn test_session_config_debug_redacts_key() {
        let config = SessionConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: SecretString::from("sk-very-secret".to_string()),
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            system_prompt: None,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert_eq!(config.api_key.expose_secret(), "sk-very-secret");
    }
}
