//! Configuration infrastructure
//!
//! JSON configuration file loaded at startup, created with defaults on
//! first run. Covers the sync pipeline settings (endpoint, cadence,
//! timeout, database location) and the logging setup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub sync: SyncConfig,

    pub logging: LoggingConfig,
}

/// Sync pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Remote collection endpoint serving the JSON record array
    pub endpoint_url: String,

    /// Bound on a single fetch, in seconds
    pub fetch_timeout_seconds: u64,

    /// Scheduler cadence, in seconds
    pub interval_seconds: u64,

    /// SQLite database URL (`sqlite:/path/to/records.db`)
    pub database_url: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint_url: remote::POSTS_URL.to_string(),
            fetch_timeout_seconds: 30,
            interval_seconds: 10,
            database_url: default_database_url(),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files when file output is enabled
    pub file_directory: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "sqlx": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut module_filters = HashMap::new();
        // sqlx logging of every statement is noise below trace level
        module_filters.insert("sqlx".to_string(), "warn".to_string());
        module_filters.insert("reqwest".to_string(), "info".to_string());
        module_filters.insert("hyper".to_string(), "info".to_string());

        Self {
            level: "info".to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            file_directory: None,
            module_filters,
        }
    }
}

fn default_database_url() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("post-sync");
    format!("sqlite:{}", data_dir.join("records.db").display())
}

/// Configuration file loading and persistence
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine system config directory")?
            .join("post-sync");
        Ok(config_dir)
    }

    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        let config_path = config_dir.join("post_sync_config.json");
        Ok(Self { config_path })
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    async fn ensure_config_dir(&self) -> Result<()> {
        let config_dir = self
            .config_path
            .parent()
            .context("Config path has no parent directory")?;
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .await
                .context("Failed to create configuration directory")?;
            info!("Created configuration directory: {:?}", config_dir);
        }
        Ok(())
    }

    /// Load the configuration, writing the defaults on first run.
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!(
                "No configuration found, writing defaults to {:?}",
                self.config_path
            );
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("Failed to read config file {:?}", self.config_path))?;

        serde_json::from_str::<AppConfig>(&content)
            .with_context(|| format!("Failed to parse config file {:?}", self.config_path))
    }

    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        self.ensure_config_dir().await?;
        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(&self.config_path, content)
            .await
            .with_context(|| format!("Failed to write config file {:?}", self.config_path))?;
        Ok(())
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

/// Remote collection endpoint constants
pub mod remote {
    /// Default collection endpoint: the posts resource of JSONPlaceholder
    pub const POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_the_documented_cadence_and_timeout() {
        let config = AppConfig::default();
        assert_eq!(config.sync.interval_seconds, 10);
        assert_eq!(config.sync.fetch_timeout_seconds, 30);
        assert_eq!(config.sync.endpoint_url, remote::POSTS_URL);
    }

    #[tokio::test]
    async fn first_load_writes_defaults_and_round_trips() -> Result<()> {
        let temp_dir = tempdir()?;
        let manager = ConfigManager::from_path(temp_dir.path().join("config.json"));

        let loaded = manager.load_config().await?;
        assert!(manager.config_path().exists());

        let mut changed = loaded.clone();
        changed.sync.interval_seconds = 60;
        manager.save_config(&changed).await?;

        let reloaded = manager.load_config().await?;
        assert_eq!(reloaded.sync.interval_seconds, 60);
        assert_eq!(reloaded.sync.endpoint_url, loaded.sync.endpoint_url);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_config_is_a_load_error() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.json");
        tokio::fs::write(&path, "{not json").await?;

        let manager = ConfigManager::from_path(path);
        assert!(manager.load_config().await.is_err());
        Ok(())
    }
}
