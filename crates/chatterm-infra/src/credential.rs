//! Environment lookup for credentials and endpoint overrides.
//!
//! Read-only: values are taken from the process environment once at
//! startup and handed to the layered resolver in `chatterm-core`.

use chatterm_core::config::EnvValues;

/// Read one variable. Missing or non-Unicode values count as absent.
fn var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(val) => Some(val),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!("{key} is set but is not valid Unicode, ignoring it");
            None
        }
    }
}

/// Snapshot every environment variable chatterm reads.
pub fn env_values() -> EnvValues {
    env_values_with(var)
}

fn env_values_with(lookup: impl Fn(&str) -> Option<String>) -> EnvValues {
    EnvValues {
        chatterm_api_key: lookup("CHATTERM_API_KEY"),
        openai_api_token: lookup("OPENAI_API_TOKEN"),
        openai_api_key: lookup("OPENAI_API_KEY"),
        openai_base_url: lookup("OPENAI_BASE_URL"),
        chatterm_model: lookup("CHATTERM_MODEL"),
    }
}
