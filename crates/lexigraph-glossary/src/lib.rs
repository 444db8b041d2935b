//! Lexigraph Glossary Service
//!
//! The single authority for terms. Owns its SQLite database outright and
//! serves the GlossaryService gRPC contract. It knows nothing about
//! relationships: deleting a term here leaves any edges in the graph
//! service untouched, and the gateway's cascade purge deals with them.

#![warn(missing_docs)]

pub mod config;
pub mod service;

use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::GlossaryConfig;
use lexigraph_grpc::proto::glossary_service_server::GlossaryServiceServer;
use lexigraph_store::TermStore;
use service::GlossaryAuthority;

/// Glossary service error
#[derive(Debug, thiserror::Error)]
pub enum GlossaryError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] lexigraph_store::StoreError),

    /// Invalid bind address
    #[error("Invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// Start the glossary gRPC server.
///
/// Opens (or creates) the database, then serves until the process is
/// stopped.
pub async fn start_server(config: GlossaryConfig) -> Result<(), GlossaryError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Lexigraph glossary service");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);

    let store = Arc::new(TermStore::new(&config.database_path)?);
    let authority = GlossaryAuthority::new(store);

    let addr = config.bind_addr().parse()?;
    Server::builder()
        .add_service(GlossaryServiceServer::new(authority))
        .serve(addr)
        .await?;

    Ok(())
}
