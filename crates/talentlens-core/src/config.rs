//! Configuration management for talentlens.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default recommendation endpoint (local backend).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/recommend";

/// Environment override for [`Config::endpoint`].
pub const ENDPOINT_ENV: &str = "TALENTLENS_ENDPOINT";

/// Main configuration structure for talentlens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Full URL of the `POST /recommend` endpoint.
    pub endpoint: String,

    /// Whether new searches ask the backend for AI insights.
    pub use_ai: bool,

    /// Where theme and history are persisted. `None` uses the state dir.
    pub storage_path: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            use_ai: true,
            storage_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;

        config.expand_tilde_in_paths();

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults. The
    /// endpoint environment override is applied either way.
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolved storage file path.
    pub fn storage_file(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(crate::paths::storage_path)
    }

    fn apply_env(&mut self) {
        if let Some(endpoint) = std::env::var(ENDPOINT_ENV)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            self.endpoint = endpoint;
        }
    }

    fn expand_tilde_in_paths(&mut self) {
        if let Some(path) = self.storage_path.take() {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            self.storage_path = Some(PathBuf::from(expanded));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "use_ai = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.use_ai);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.storage_path, None);
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            endpoint: "http://example.test/recommend".to_string(),
            use_ai: false,
            storage_path: Some(dir.path().join("store.json")),
            log_level: "debug".to_string(),
        };

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn storage_path_expands_tilde() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage_path = \"~/tl/store.json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        let storage = config.storage_file();
        assert!(!storage.to_string_lossy().starts_with('~'));
        assert!(storage.ends_with("tl/store.json"));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "use_ai = \"maybe\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(crate::Error::Config(_))));
    }

    #[test]
    fn env_overrides_endpoint() {
        let _lock = crate::paths::test_env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        std::env::set_var(ENDPOINT_ENV, "http://override.test/recommend");
        let config = Config::load_or_default(&path);
        std::env::remove_var(ENDPOINT_ENV);

        let config = config.unwrap();
        assert_eq!(config.endpoint, "http://override.test/recommend");
        assert!(config.use_ai);
    }

    #[test]
    fn state_dir_follows_env() {
        let _lock = crate::paths::test_env_lock();
        let dir = tempfile::tempdir().unwrap();

        std::env::set_var("TALENTLENS_DIR", dir.path());
        let storage = Config::default().storage_file();
        let log = crate::paths::log_path();
        std::env::remove_var("TALENTLENS_DIR");

        assert_eq!(storage, dir.path().join("storage.json"));
        assert_eq!(log, dir.path().join("talentlens.log"));
    }
}
