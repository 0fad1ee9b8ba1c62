use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT};
use crate::error::{Result, UtilsError};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this crate's events; `RUST_LOG` still applies on top
    pub level: String,
    /// Directory for daily-rotated JSON logs; console only when unset
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            dir: None,
        }
    }
}

impl Config {
    /// Load `config.toml` (if present), then apply `.env` and environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::from_file(DEFAULT_CONFIG_PATH)?;
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Like [`Config::load`], but reads `path`, which must exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(UtilsError::Config(format!(
                "Config file '{}' not found",
                path.display()
            )));
        }
        dotenv::dotenv().ok();
        let mut config = Self::from_file(path)?;
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Read a TOML config file. A missing file yields the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(path).map_err(|e| {
            UtilsError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Override fields from `HOST`, `PORT`, `LOG_LEVEL` and `LOG_DIR`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| UtilsError::Config(format!("PORT must be a port number, got '{}'", port)))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(dir) = lookup("LOG_DIR") {
            self.logging.dir = Some(dir);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::from_file("/nonexistent/config.toml").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000\n\n[logging]\ndir = \"logs\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.logging.dir.as_deref(), Some("logs"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, UtilsError::Config(ref m) if m.contains("absent.toml")));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(UtilsError::Toml(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [("PORT", "3000"), ("HOST", "127.0.0.1"), ("LOG_LEVEL", "debug")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.dir, None);
    }

    #[test]
    fn test_bad_port_is_a_config_error() {
        let mut config = Config::default();
        let err = config
            .apply_env(|k| (k == "PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, UtilsError::Config(_)));
    }
}
