//! Lexigraph Graph Service
//!
//! The single authority for typed relationships between terms. Owns its
//! SQLite database outright and serves the GraphService gRPC contract.
//! Endpoint ids are opaque strings here; validation against the glossary
//! happens at the gateway, before a write ever reaches this service.

#![warn(missing_docs)]

pub mod config;
pub mod service;

use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::GraphConfig;
use lexigraph_grpc::proto::graph_service_server::GraphServiceServer;
use lexigraph_store::GraphStore;
use service::GraphAuthority;

/// Graph service error
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
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

/// Start the graph gRPC server.
///
/// Opens (or creates) the database, then serves until the process is
/// stopped.
pub async fn start_server(config: GraphConfig) -> Result<(), GraphError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Lexigraph graph service");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);

    let store = Arc::new(GraphStore::new(&config.database_path)?);
    let authority = GraphAuthority::new(store);

    let addr = config.bind_addr().parse()?;
    Server::builder()
        .add_service(GraphServiceServer::new(authority))
        .serve(addr)
        .await?;

    Ok(())
}
