//! Configuration loading for the gateway.

use lexigraph_engine::DEFAULT_FAN_OUT;
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

/// Runtime configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Address the gRPC server binds to.
    pub bind_address: String,
    /// Port the gRPC server listens on.
    pub bind_port: u16,
    /// Endpoint of the glossary authority, e.g. "http://localhost:50051".
    pub glossary_endpoint: String,
    /// Endpoint of the graph authority, e.g. "http://localhost:50052".
    pub graph_endpoint: String,
    /// Cap on concurrent neighbor lookups per composed request.
    #[serde(default = "default_fan_out")]
    pub fan_out: usize,
    /// Install the demonstration glossary on startup.
    #[serde(default)]
    pub seed_on_startup: bool,
}

fn default_fan_out() -> usize {
    DEFAULT_FAN_OUT
}

impl GatewayConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GatewayConfig = toml::from_str(&content)?;
        if config.glossary_endpoint.is_empty() {
            return Err(ConfigError::MissingField("glossary_endpoint".to_string()));
        }
        if config.graph_endpoint.is_empty() {
            return Err(ConfigError::MissingField("graph_endpoint".to_string()));
        }
        Ok(config)
    }

    /// Default configuration used by tests and local development.
    ///
    /// Seeding is on here so a bare three-process stack comes up with the
    /// demonstration glossary installed.
    pub fn default_test_config() -> Self {
        GatewayConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 50050,
            glossary_endpoint: "http://localhost:50051".to_string(),
            graph_endpoint: "http://localhost:50052".to_string(),
            fan_out: DEFAULT_FAN_OUT,
            seed_on_startup: true,
        }
    }

    /// The full socket address string for the server to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
