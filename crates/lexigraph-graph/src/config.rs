//! Configuration loading for the relationship authority.

use serde::Deserialize;
use std::path::Path;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the TOML content.
    #[error("failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A required field is missing or invalid.
    #[error("invalid config: {0}")]
    MissingField(String),
}

/// Runtime configuration for the graph service.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Address the gRPC server binds to.
    pub bind_address: String,
    /// Port the gRPC server listens on.
    pub bind_port: u16,
    /// Path to the SQLite database file holding the relationship table.
    pub database_path: String,
}

impl GraphConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GraphConfig = toml::from_str(&content)?;
        if config.database_path.is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }
        Ok(config)
    }

    /// Default configuration used by tests and local development.
    pub fn default_test_config() -> Self {
        GraphConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 50052,
            database_path: "graph.db".to_string(),
        }
    }

    /// The full socket address string for the server to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
