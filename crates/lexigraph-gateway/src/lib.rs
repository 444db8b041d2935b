//! Lexigraph Gateway Service
//!
//! The only surface clients talk to. Proxies term operations to the
//! glossary authority, guards relationship writes against it, and composes
//! the cross-store views (enriched terms, mind maps) through the
//! aggregation engine. Holds no storage of its own.

#![warn(missing_docs)]

pub mod clients;
pub mod config;
pub mod seed;
pub mod service;

use std::sync::Arc;

use tonic::transport::{Channel, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use clients::{GrpcRelationshipGraph, GrpcTermLookup};
use config::GatewayConfig;
use lexigraph_engine::AggregationEngine;
use lexigraph_grpc::proto::gateway_service_server::GatewayServiceServer;
use lexigraph_grpc::proto::glossary_service_client::GlossaryServiceClient;
use lexigraph_grpc::proto::graph_service_client::GraphServiceClient;
use service::Gateway;

/// Gateway service error
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Invalid bind address
    #[error("Invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    /// Invalid upstream endpoint URI
    #[error("Invalid upstream endpoint: {0}")]
    Endpoint(String),

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// Start the gateway gRPC server.
///
/// Upstream channels connect lazily: the gateway comes up immediately and
/// reports upstream trouble per-request as UNAVAILABLE instead of refusing
/// to boot.
pub async fn start_server(config: GatewayConfig) -> Result<(), GatewayError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Lexigraph gateway");
    info!("Bind address: {}", config.bind_addr());
    info!("Glossary authority: {}", config.glossary_endpoint);
    info!("Graph authority: {}", config.graph_endpoint);

    let glossary_channel = Channel::from_shared(config.glossary_endpoint.clone())
        .map_err(|e| GatewayError::Endpoint(format!("{}: {}", config.glossary_endpoint, e)))?
        .connect_lazy();
    let graph_channel = Channel::from_shared(config.graph_endpoint.clone())
        .map_err(|e| GatewayError::Endpoint(format!("{}: {}", config.graph_endpoint, e)))?
        .connect_lazy();

    let engine = Arc::new(AggregationEngine::with_fan_out(
        Arc::new(GrpcTermLookup::new(glossary_channel.clone())),
        Arc::new(GrpcRelationshipGraph::new(graph_channel.clone())),
        config.fan_out,
    ));

    if config.seed_on_startup {
        seed::spawn_seeder(
            GlossaryServiceClient::new(glossary_channel.clone()),
            Arc::clone(&engine),
        );
    }

    let gateway = Gateway::new(
        GlossaryServiceClient::new(glossary_channel),
        GraphServiceClient::new(graph_channel),
        engine,
    );

    let addr = config.bind_addr().parse()?;
    Server::builder()
        .add_service(GatewayServiceServer::new(gateway))
        .serve(addr)
        .await?;

    Ok(())
}
