//! Configuration management for the pickpool service.
//!
//! Settings come from a TOML file with environment variable overrides
//! and are validated before the server starts.

use crate::errors::{ConfigurationError, PoolResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub contest: ContestBootstrapConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub listen_address: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

/// Data directory settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    pub data_dir: String,
}

/// Values used only when seeding a fresh data directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContestBootstrapConfig {
    pub admin_token: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            contest: ContestBootstrapConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./pool_data".to_string(),
        }
    }
}

impl Default for ContestBootstrapConfig {
    fn default() -> Self {
        Self {
            admin_token: "change-me".to_string(),
        }
    }
}

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> PoolResult<AppConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            AppConfig::default()
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> PoolResult<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into()
        })
    }

    fn apply_env_overrides(&self, config: &mut AppConfig) -> PoolResult<()> {
        if let Ok(addr) = env::var("PICKPOOL_API_ADDRESS") {
            config.api.listen_address = addr;
        }
        if let Ok(port) = env::var("PICKPOOL_API_PORT") {
            config.api.port = port.parse().map_err(|_| ConfigurationError::InvalidValue {
                field: "PICKPOOL_API_PORT".to_string(),
                value: port,
                reason: "Invalid port number".to_string(),
            })?;
        }
        if let Ok(data_dir) = env::var("PICKPOOL_DATA_DIR") {
            config.storage.data_dir = data_dir;
        }
        if let Ok(token) = env::var("PICKPOOL_ADMIN_TOKEN") {
            config.contest.admin_token = token;
        }

        Ok(())
    }

    fn validate(&self, config: &AppConfig) -> PoolResult<()> {
        if config.api.port == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "api.port".to_string(),
                value: "0".to_string(),
                reason: "Port cannot be zero".to_string(),
            }
            .into());
        }

        if config.api.request_timeout_secs == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "api.request_timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least one second".to_string(),
            }
            .into());
        }

        if config.storage.data_dir.is_empty() {
            return Err(ConfigurationError::MissingRequired("storage.data_dir".to_string()).into());
        }

        if config.contest.admin_token.is_empty() {
            return Err(
                ConfigurationError::MissingRequired("contest.admin_token".to_string()).into()
            );
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig, path: &str) -> PoolResult<()> {
        let toml_string = toml::to_string_pretty(config).map_err(|e| {
            ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, toml_string).map_err(|e| {
            ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into()
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.storage.data_dir, "./pool_data");
    }

    #[test]
    fn test_config_validation() {
        let loader = ConfigLoader::new();
        let mut config = AppConfig::default();

        assert!(loader.validate(&config).is_ok());

        config.api.port = 0;
        assert!(loader.validate(&config).is_err());

        config.api.port = 8080;
        config.contest.admin_token.clear();
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn test_save_and_load_config() -> PoolResult<()> {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        let mut original = AppConfig::default();
        original.api.port = 9001;
        original.contest.admin_token = "hunter2".to_string();

        let loader = ConfigLoader::new();
        loader.save(&original, path)?;

        let loaded = ConfigLoader::new().with_path(path).load()?;
        assert_eq!(loaded.api.port, 9001);
        assert_eq!(loaded.contest.admin_token, "hunter2");

        Ok(())
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "[api]\nlisten_address = \"127.0.0.1\"\nport = 9000\ncors_origins = [\"*\"]\nrequest_timeout_secs = 10\n").unwrap();

        let loaded = ConfigLoader::new().with_path(temp_file.path()).load().unwrap();
        assert_eq!(loaded.api.port, 9000);
        assert_eq!(loaded.storage.data_dir, "./pool_data");
    }
}
