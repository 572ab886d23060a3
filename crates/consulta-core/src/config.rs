//! Configuration file management for Consulta.
//!
//! Reads `~/.config/consulta/config.toml`; every field has a default so a
//! missing file yields a working configuration. `CONSULTA_ENDPOINT` and
//! `CONSULTA_TIMEOUT_SECS` override the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConsultaError;

const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/query";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Greeting turn seeded into a fresh session.
pub const DEFAULT_WELCOME: &str = "¡Hola! Soy tu experto SQL. 🤖\n\n\
Puedo ayudarte a extraer datos sin que escribas código. Por ejemplo:\n\n\
• \"Top 5 productos más vendidos\"\n\
• \"Usuarios registrados el último mes\"\n\
• \"Total de ventas por categoría\"";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultaConfig {
    /// URL of the remote agent endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Deadline for one outbound query, in seconds. A call that exceeds it
    /// takes the failure path and clears the in-flight flag.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Optional cap on the history log; unbounded when absent.
    #[serde(default)]
    pub history_limit: Option<usize>,
    /// Greeting turn for a fresh session; `None` disables it.
    #[serde(default = "default_welcome")]
    pub welcome_message: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_welcome() -> Option<String> {
    Some(DEFAULT_WELCOME.to_string())
}

impl Default for ConsultaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_timeout_secs(),
            history_limit: None,
            welcome_message: default_welcome(),
        }
    }
}

impl ConsultaConfig {
    /// Loads the configuration from the default path and applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if an override value is malformed.
    pub fn load() -> Result<Self, ConsultaError> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Loads the configuration from an explicit path.
    ///
    /// A missing file is not an error: defaults are returned.
    pub fn load_from(path: &Path) -> Result<Self, ConsultaError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ConsultaError::config(format!(
                "failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            ConsultaError::config(format!(
                "failed to parse configuration file at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Returns the path to the configuration file: ~/.config/consulta/config.toml
    fn config_path() -> Result<PathBuf, ConsultaError> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConsultaError::config("could not determine home directory"))?;
        Ok(home.join(".config").join("consulta").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConsultaError> {
        if let Ok(endpoint) = env::var("CONSULTA_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(secs) = env::var("CONSULTA_TIMEOUT_SECS") {
            self.request_timeout_secs = secs.parse().map_err(|_| {
                ConsultaError::config(format!(
                    "CONSULTA_TIMEOUT_SECS must be a number of seconds, got '{secs}'"
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config = ConsultaConfig::load_from(&config_path).unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.history_limit, None);
        assert!(config.welcome_message.is_some());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "endpoint = \"https://example.com/api/query\"\n").unwrap();

        let config = ConsultaConfig::load_from(&config_path).unwrap();

        assert_eq!(config.endpoint, "https://example.com/api/query");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_full_file_is_parsed() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            concat!(
                "endpoint = \"https://example.com/api/query\"\n",
                "request_timeout_secs = 5\n",
                "history_limit = 20\n",
                "welcome_message = \"Hola\"\n",
            ),
        )
        .unwrap();

        let config = ConsultaConfig::load_from(&config_path).unwrap();

        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.history_limit, Some(20));
        assert_eq!(config.welcome_message.as_deref(), Some("Hola"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "request_timeout_secs = \"pronto\"\n").unwrap();

        let err = ConsultaConfig::load_from(&config_path).unwrap_err();
        assert!(err.is_config());
    }
}
