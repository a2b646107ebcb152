//! Application Configuration
//!
//! Configuration is read from a YAML file with sensible defaults. The
//! backend choice for each store can additionally be overridden through
//! environment variables, which keeps tests and local runs on the mock
//! backends without editing the file.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Record store backend types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RecordBackend {
    Rest,
    Mock,
}

impl Default for RecordBackend {
    fn default() -> Self {
        RecordBackend::Rest
    }
}

impl std::str::FromStr for RecordBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" => Ok(RecordBackend::Rest),
            "mock" => Ok(RecordBackend::Mock),
            _ => Err(format!("Unknown record store backend: {}", s)),
        }
    }
}

/// Asset store backend types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AssetBackend {
    Http,
    Mock,
}

impl Default for AssetBackend {
    fn default() -> Self {
        AssetBackend::Http
    }
}

impl std::str::FromStr for AssetBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(AssetBackend::Http),
            "mock" => Ok(AssetBackend::Mock),
            _ => Err(format!("Unknown asset store backend: {}", s)),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Record store client configuration
    pub record_store: RecordStoreConfig,
    /// Asset store client configuration
    pub asset_store: AssetStoreConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
    /// Maximum payload size in bytes
    pub max_payload_size: usize,
}

/// Record store client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStoreConfig {
    /// Record store backend type
    pub backend: RecordBackend,
    /// Base address of the record store service
    pub base_url: String,
    /// Project API key sent alongside the caller token
    pub api_key: String,
    /// Table holding company rows
    pub table: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Asset store client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetStoreConfig {
    /// Asset store backend type
    pub backend: AssetBackend,
    /// Base address of the asset store service
    pub base_url: String,
    /// Project API key sent alongside the caller token
    pub api_key: String,
    /// Bucket holding company logos
    pub bucket: String,
    /// max-age value for the cache directive sent with uploads
    pub cache_max_age: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Path to log configuration file
    pub config_file: String,
}

impl AppConfig {
    /// Load configuration from file, use defaults if not found
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = "config.yaml";
        let mut config = if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path)?;
            let config: AppConfig = serde_yaml::from_str(&content)?;
            info!("Loaded configuration from {}", config_path);
            config
        } else {
            warn!("Config file not found, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply backend overrides from environment variables
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("RECORD_STORE_BACKEND") {
            match value.parse::<RecordBackend>() {
                Ok(backend) => {
                    info!("Using record store backend from environment: {:?}", backend);
                    self.record_store.backend = backend;
                }
                Err(e) => {
                    warn!(
                        "Invalid record store backend in environment: {}. Keeping {:?}.",
                        e, self.record_store.backend
                    );
                }
            }
        }
        if let Ok(value) = env::var("ASSET_STORE_BACKEND") {
            match value.parse::<AssetBackend>() {
                Ok(backend) => {
                    info!("Using asset store backend from environment: {:?}", backend);
                    self.asset_store.backend = backend;
                }
                Err(e) => {
                    warn!(
                        "Invalid asset store backend in environment: {}. Keeping {:?}.",
                        e, self.asset_store.backend
                    );
                }
            }
        }
    }

    /// Create default configuration
    pub fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9710,
                workers: 4,
                max_payload_size: 10485760, // 10MB
            },
            record_store: RecordStoreConfig {
                backend: RecordBackend::Rest,
                base_url: "http://127.0.0.1:54321".to_string(),
                api_key: String::new(),
                table: "companies".to_string(),
                timeout_secs: 30,
            },
            asset_store: AssetStoreConfig {
                backend: AssetBackend::Http,
                base_url: "http://127.0.0.1:54321".to_string(),
                api_key: String::new(),
                bucket: "company-logo".to_string(),
                cache_max_age: 3600,
                timeout_secs: 30,
            },
            logging: LoggingConfig {
                config_file: "server_log.yaml".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("rest".parse::<RecordBackend>().unwrap(), RecordBackend::Rest);
        assert_eq!("REST".parse::<RecordBackend>().unwrap(), RecordBackend::Rest);
        assert_eq!("mock".parse::<RecordBackend>().unwrap(), RecordBackend::Mock);
        assert!("invalid".parse::<RecordBackend>().is_err());

        assert_eq!("http".parse::<AssetBackend>().unwrap(), AssetBackend::Http);
        assert_eq!("MOCK".parse::<AssetBackend>().unwrap(), AssetBackend::Mock);
        assert!("invalid".parse::<AssetBackend>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.record_store.backend, RecordBackend::Rest);
        assert_eq!(config.record_store.table, "companies");
        assert_eq!(config.asset_store.backend, AssetBackend::Http);
        assert_eq!(config.asset_store.bucket, "company-logo");
        assert_eq!(config.asset_store.cache_max_age, 3600);
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
server:
  host: "0.0.0.0"
  port: 8000
  workers: 2
  max_payload_size: 1048576
record_store:
  backend: Mock
  base_url: "http://records.local"
  api_key: "key"
  table: "companies"
  timeout_secs: 5
asset_store:
  backend: Mock
  base_url: "http://assets.local"
  api_key: "key"
  bucket: "company-logo"
  cache_max_age: 60
  timeout_secs: 5
logging:
  config_file: "server_log.yaml"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.record_store.backend, RecordBackend::Mock);
        assert_eq!(config.asset_store.backend, AssetBackend::Mock);
        assert_eq!(config.asset_store.cache_max_age, 60);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var("RECORD_STORE_BACKEND", "mock");
        env::set_var("ASSET_STORE_BACKEND", "mock");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.record_store.backend, RecordBackend::Mock);
        assert_eq!(config.asset_store.backend, AssetBackend::Mock);

        // Invalid values keep the configured backend
        env::set_var("RECORD_STORE_BACKEND", "invalid");
        env::set_var("ASSET_STORE_BACKEND", "invalid");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.record_store.backend, RecordBackend::Rest);
        assert_eq!(config.asset_store.backend, AssetBackend::Http);

        env::remove_var("RECORD_STORE_BACKEND");
        env::remove_var("ASSET_STORE_BACKEND");
    }
}
