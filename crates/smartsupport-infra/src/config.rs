//! Client configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.smartsupport/` by default)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use smartsupport_types::config::ClientConfig;
use smartsupport_types::error::ConfigError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SMARTSUPPORT_DATA_DIR";

/// Resolve the data directory.
///
/// Priority:
/// 1. `SMARTSUPPORT_DATA_DIR` environment variable
/// 2. `~/.smartsupport`
/// 3. `.smartsupport` relative to the working directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".smartsupport");
    }

    PathBuf::from(".smartsupport")
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Read `{data_dir}/config.toml`.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn read_client_config(data_dir: &Path) -> Result<Option<ClientConfig>, ConfigError> {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Read(format!("{}: {err}", path.display()))),
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse(format!("{}: {err}", path.display())))
}

/// Load client configuration, never failing.
///
/// - Missing file: [`ClientConfig::default()`].
/// - Unreadable or malformed file: logs a warning and returns the default.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    match read_client_config(data_dir).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!(
                "No config.toml found in {}, using defaults",
                data_dir.display()
            );
            ClientConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        assert!(read_client_config(tmp.path()).await.unwrap().is_none());
        assert_eq!(load_client_config(tmp.path()).await, ClientConfig::default());
    }

    #[tokio::test]
    async fn valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            config_path(tmp.path()),
            r#"
api_url = "https://support.example.com/"
request_timeout_secs = 30
use_tools = false
prompt_key = "react_agent"
discard_stale_replies = true
"#,
        )
        .await
        .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.api_url, "https://support.example.com/");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.use_rag);
        assert!(!config.use_tools);
        assert_eq!(config.prompt_key, "react_agent");
        assert!(config.discard_stale_replies);
    }

    #[tokio::test]
    async fn invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(config_path(tmp.path()), "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = read_client_config(tmp.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert_eq!(load_client_config(tmp.path()).await, ClientConfig::default());
    }

    #[tokio::test]
    async fn wrong_field_type_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(config_path(tmp.path()), "use_rag = \"sometimes\"")
            .await
            .unwrap();

        assert_eq!(load_client_config(tmp.path()).await, ClientConfig::default());
    }

    #[test]
    fn config_path_is_inside_data_dir() {
        let path = config_path(Path::new("/tmp/ss"));
        assert_eq!(path, PathBuf::from("/tmp/ss/config.toml"));
    }
}
