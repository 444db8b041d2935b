//! Configuration file parsing for the glossary service.
//!
//! Loads settings from TOML files: bind address and the SQLite database
//! path this authority owns.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Glossary configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Glossary service configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct GlossaryConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 50051)
    pub bind_port: u16,

    /// Path to the SQLite database file (":memory:" for ephemeral)
    pub database_path: String,
}

impl GlossaryConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: GlossaryConfig = toml::from_str(&contents)?;

        if config.database_path.is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        GlossaryConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 50051,
            database_path: "glossary.db".to_string(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GlossaryConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 50051);
        assert_eq!(config.database_path, "glossary.db");
    }

    #[test]
    fn test_bind_addr() {
        let config = GlossaryConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:50051");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 50061
            database_path = "/var/lib/lexigraph/glossary.db"
        "#;

        let config: GlossaryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 50061);
        assert_eq!(config.database_path, "/var/lib/lexigraph/glossary.db");
    }
}
