use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::translation::DEFAULT_WORKERS;

/// Backend settings in the `[backend]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Translation API endpoint URL.
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl BackendConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }
}

/// Worker pool settings in the `[pool]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Concurrent backend calls across the whole process.
    pub workers: Option<usize>,
    /// Bound on waiting for one unit's translation. Unset means no bound.
    pub unit_timeout_secs: Option<u64>,
}

/// History store settings in the `[history]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Database file override; defaults to the data directory.
    pub path: Option<PathBuf>,
    /// Cap on insert attempts when record ids keep colliding. Unset means
    /// retry until a row lands.
    pub max_insert_attempts: Option<u32>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/wordwise/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub endpoint: Option<String>,
    pub workers: Option<usize>,
}

/// Configuration after merging CLI options with the config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub workers: usize,
    pub unit_timeout: Option<Duration>,
    pub history_path: PathBuf,
    pub max_insert_attempts: Option<u32>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// # Errors
///
/// Returns an error if no backend endpoint is configured anywhere.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let endpoint = options
        .endpoint
        .as_ref()
        .or(config_file.backend.endpoint.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'endpoint'\n\n\
                 Please provide it via:\n  \
                 - CLI option: wordwise --endpoint <url>\n  \
                 - Config file: ~/.config/wordwise/config.toml ([backend] endpoint)"
            )
        })?;

    Ok(ResolvedConfig {
        endpoint,
        api_key: config_file.backend.resolve_api_key(),
        workers: options
            .workers
            .or(config_file.pool.workers)
            .unwrap_or(DEFAULT_WORKERS),
        unit_timeout: config_file.pool.unit_timeout_secs.map(Duration::from_secs),
        history_path: config_file
            .history
            .path
            .clone()
            .unwrap_or_else(|| paths::data_dir().join("history.db")),
        max_insert_attempts: config_file.history.max_insert_attempts,
    })
}

/// Loads the configuration file from disk.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config_path: paths::config_dir().join("config.toml"),
        }
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads the config file, or defaults when it does not exist.
    pub fn load(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            return Ok(ConfigFile::default());
        }

        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let file: ConfigFile = toml::from_str(
            r#"
            [backend]
            endpoint = "https://translate.example.com"
            api_key_env = "WORDWISE_API_KEY"

            [pool]
            workers = 4
            unit_timeout_secs = 30

            [history]
            max_insert_attempts = 5
            "#,
        )
        .unwrap();

        assert_eq!(
            file.backend.endpoint.as_deref(),
            Some("https://translate.example.com")
        );
        assert_eq!(file.pool.workers, Some(4));
        assert_eq!(file.pool.unit_timeout_secs, Some(30));
        assert_eq!(file.history.max_insert_attempts, Some(5));
    }

    #[test]
    fn test_empty_config_parses_to_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.backend.endpoint.is_none());
        assert!(file.pool.workers.is_none());
        assert!(file.history.path.is_none());
    }

    #[test]
    fn test_cli_endpoint_takes_precedence() {
        let file: ConfigFile = toml::from_str(
            r#"
            [backend]
            endpoint = "https://from-file.example.com"
            "#,
        )
        .unwrap();

        let options = ResolveOptions {
            endpoint: Some("https://from-cli.example.com".to_string()),
            workers: None,
        };

        let resolved = resolve_config(&options, &file).unwrap();
        assert_eq!(resolved.endpoint, "https://from-cli.example.com");
    }

    #[test]
    fn test_missing_endpoint_is_an_error() {
        let result = resolve_config(&ResolveOptions::default(), &ConfigFile::default());

        let message = result.unwrap_err().to_string();
        assert!(message.contains("endpoint"));
        assert!(message.contains("config.toml"));
    }

    #[test]
    fn test_workers_default_when_unconfigured() {
        let file: ConfigFile = toml::from_str(
            r#"
            [backend]
            endpoint = "https://translate.example.com"
            "#,
        )
        .unwrap();

        let resolved = resolve_config(&ResolveOptions::default(), &file).unwrap();
        assert_eq!(resolved.workers, DEFAULT_WORKERS);
        assert!(resolved.unit_timeout.is_none());
        assert!(resolved.max_insert_attempts.is_none());
    }

    #[test]
    #[serial]
    fn test_api_key_env_wins_over_file_value() {
        let config = BackendConfig {
            endpoint: None,
            api_key: Some("from-file".to_string()),
            api_key_env: Some("WORDWISE_TEST_API_KEY".to_string()),
        };

        unsafe { std::env::set_var("WORDWISE_TEST_API_KEY", "from-env") };
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-env"));

        unsafe { std::env::remove_var("WORDWISE_TEST_API_KEY") };
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-file"));
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let manager = ConfigManager::with_path(PathBuf::from("/nonexistent/config.toml"));
        let file = manager.load().unwrap();
        assert!(file.backend.endpoint.is_none());
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[pool]\nworkers = 2").unwrap();

        let manager = ConfigManager::with_path(temp_file.path().to_path_buf());
        let file = manager.load().unwrap();
        assert_eq!(file.pool.workers, Some(2));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not toml at all [").unwrap();

        let manager = ConfigManager::with_path(temp_file.path().to_path_buf());
        assert!(manager.load().is_err());
    }
}
