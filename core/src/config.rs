//! Client configuration: where the API lives and how we identify ourselves.
//!
//! Sources, lowest to highest priority:
//! 1. built-in defaults,
//! 2. an optional TOML file,
//! 3. `BIBLIOTECA_*` environment variables (`BIBLIOTECA_BASE_URL`,
//!    `BIBLIOTECA_USER_AGENT`).

use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const ENV_PREFIX: &str = "BIBLIOTECA";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("invalid configuration for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    fn validation(field: &str, message: &str) -> Self {
        ConfigError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("biblioteca-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load defaults, then `file` if given, then the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, None)
    }

    /// Like [`ClientConfig::load`], reading environment variables from `env`
    /// instead of the process when it is `Some`.
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("user_agent", defaults.user_agent)?;

        if let Some(path) = file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::validation("base_url", "must not be empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::validation(
                "base_url",
                "must start with http:// or https://",
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::validation("user_agent", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_apply_without_sources() {
        let config = ClientConfig::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("biblioteca-client/"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::load_with_env(
            None,
            env(&[("BIBLIOTECA_BASE_URL", "https://biblioteca.example.com")]),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://biblioteca.example.com");
    }

    #[test]
    fn file_is_read_and_environment_wins() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "base_url = \"http://from-file:5000\"").unwrap();
        writeln!(file, "user_agent = \"file-agent\"").unwrap();

        let config = ClientConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.base_url, "http://from-file:5000");
        assert_eq!(config.user_agent, "file-agent");

        let config = ClientConfig::load_with_env(
            Some(file.path()),
            env(&[("BIBLIOTECA_BASE_URL", "http://from-env:5000")]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://from-env:5000");
        assert_eq!(config.user_agent, "file-agent");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ClientConfig::load_with_env(Some(Path::new("/nonexistent/biblioteca.toml")), env(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn base_url_without_scheme_is_rejected() {
        let err = ClientConfig::load_with_env(None, env(&[("BIBLIOTECA_BASE_URL", "localhost:5000")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"));
    }
}
