//! HTTP Server Configuration
//!
//! Host, port, store location, compression threshold, CORS and log
//! filter. Loaded from an optional JSON file; every field has a default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::DEFAULT_STORE_FILE;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Store file (default: "patients.json")
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Smallest response body, in bytes, that gets gzip-compressed
    #[serde(default = "default_gzip_min_size")]
    pub gzip_min_size: u16,

    /// CORS allowed origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

fn default_gzip_min_size() -> u16 {
    1000
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store_path: default_store_path(),
            gzip_min_size: default_gzip_min_size(),
            cors_origins: Vec::new(),
            log_filter: default_log_filter(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Loads the config file at `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store_path must not be empty".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.store_path, PathBuf::from("patients.json"));
        assert_eq!(config.gzip_min_size, 1000);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = HttpServerConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patientdb.json");
        fs::write(&path, r#"{"port": 9100, "store_path": "/var/lib/p.json"}"#).unwrap();

        let config = HttpServerConfig::load(&path).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.store_path, PathBuf::from("/var/lib/p.json"));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_zero_port_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patientdb.json");
        fs::write(&path, r#"{"port": 0}"#).unwrap();
        assert!(matches!(
            HttpServerConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_bad_json_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patientdb.json");
        fs::write(&path, "port = 1").unwrap();
        assert!(matches!(
            HttpServerConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
