//! Configuration module for pdfdrop.

use serde::Deserialize;
use std::path::Path;

use crate::{PdfdropError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means no cross-origin access.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the upload directory. Resolved to an absolute path at startup.
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_storage_path() -> String {
    "data/uploads".to_string()
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/pdfdrop.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PdfdropError::Config(e.to_string()))
    }

    /// Load `config.toml` if present, then apply environment overrides.
    ///
    /// Recognized variables: `PORT`, `PDFDROP_STORAGE_PATH`, `MAX_UPLOAD_BYTES`.
    pub fn from_env() -> Result<Self> {
        let mut config = if Path::new("config.toml").exists() {
            Self::load("config.toml")?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply environment-style overrides from a variable lookup.
    ///
    /// Taking the lookup as a closure keeps this testable without touching
    /// process-global state.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| PdfdropError::Config(format!("invalid PORT value: {port}")))?;
        }
        if let Some(path) = var("PDFDROP_STORAGE_PATH") {
            self.storage.path = path;
        }
        if let Some(max) = var("MAX_UPLOAD_BYTES") {
            self.storage.max_upload_bytes = max.parse().map_err(|_| {
                PdfdropError::Config(format!("invalid MAX_UPLOAD_BYTES value: {max}"))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.storage.path, "data/uploads");
        assert_eq!(config.storage.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
cors_origins = ["http://localhost:5173"]

[storage]
path = "/var/lib/pdfdrop"
max_upload_bytes = 20971520

[logging]
level = "debug"
file = "logs/test.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.storage.path, "/var/lib/pdfdrop");
        assert_eq!(config.storage.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "logs/test.log");
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let toml = r#"
[server]
port = 4000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("not valid toml [");
        assert!(matches!(result, Err(PdfdropError::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();

        config
            .apply_env_overrides(|name| match name {
                "PORT" => Some("8123".to_string()),
                "PDFDROP_STORAGE_PATH" => Some("/tmp/uploads".to_string()),
                "MAX_UPLOAD_BYTES" => Some("1024".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.server.port, 8123);
        assert_eq!(config.storage.path, "/tmp/uploads");
        assert_eq!(config.storage.max_upload_bytes, 1024);
    }

    #[test]
    fn test_env_overrides_absent_keeps_defaults() {
        let mut config = Config::default();

        config.apply_env_overrides(|_| None).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.path, "data/uploads");
    }

    #[test]
    fn test_env_override_invalid_port() {
        let mut config = Config::default();

        let result = config.apply_env_overrides(|name| match name {
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        });

        assert!(matches!(result, Err(PdfdropError::Config(_))));
    }

    #[test]
    fn test_env_override_invalid_max_bytes() {
        let mut config = Config::default();

        let result = config.apply_env_overrides(|name| match name {
            "MAX_UPLOAD_BYTES" => Some("-5".to_string()),
            _ => None,
        });

        assert!(matches!(result, Err(PdfdropError::Config(_))));
    }
}
