//! Config file loader for chatterm.
//!
//! Reads `config.toml` from the chatterm home directory (`~/.chatterm/`
//! by default) and deserializes it into [`FileConfig`]. Falls back to an
//! empty config when the file is missing or malformed. The file is never
//! written.

use std::path::{Path, PathBuf};

use chatterm_types::config::FileConfig;

/// File name of the config file inside the home directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the chatterm home directory.
///
/// Priority:
/// 1. `CHATTERM_HOME` environment variable
/// 2. `~/.chatterm`
/// 3. `./.chatterm` when no home directory can be determined
pub fn resolve_home_dir() -> PathBuf {
    home_dir_from(std::env::var("CHATTERM_HOME").ok())
}

fn home_dir_from(env_override: Option<String>) -> PathBuf {
    if let Some(dir) = env_override.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatterm");
    }

    PathBuf::from(".chatterm")
}

/// Path of `config.toml` inside `home_dir`.
pub fn config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(CONFIG_FILE_NAME)
}

/// Load `{home_dir}/config.toml`.
///
/// - If the file does not exist, returns [`FileConfig::default()`].
/// - If the file cannot be read or fails to parse, logs a warning and
///   returns the default.
pub async fn load_file_config(home_dir: &Path) -> FileConfig {
    let path = config_path(home_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return FileConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return FileConfig::default();
        }
    };

    match toml::from_str::<FileConfig>(&content) {
        Ok(config) => {
            tracing::debug!("Loaded {}", path.display());
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            FileConfig::default()
        }
    }
}
