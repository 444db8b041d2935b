//! Idempotent startup seeding of a demonstration glossary
//!
//! Installs a small set of real infrastructure terms and the typed edges
//! between them, going through the same glossary client and engine paths
//! external callers use. Safe to run on every startup: existing terms are
//! re-resolved by name, and edges are upserts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tonic::transport::Channel;
use tonic::{Code, Request};
use tracing::{debug, error, info, warn};

use lexigraph_domain::{CoreError, CoreResult, Relationship, RelationshipType, TermId};
use lexigraph_engine::AggregationEngine;
use lexigraph_grpc::core_from_status;
use lexigraph_grpc::proto;
use lexigraph_grpc::proto::glossary_service_client::GlossaryServiceClient;

/// Grace period before the first seeding attempt, so both authorities get
/// a chance to come up when the whole stack starts at once.
const STARTUP_DELAY: Duration = Duration::from_secs(15);

const MAX_ATTEMPTS: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_secs(3);

const SEED_TERMS: [(&str, &str); 7] = [
    (
        "Microservice",
        "A software development technique that structures an application as a collection of loosely coupled services.",
    ),
    (
        "API Gateway",
        "An API management tool that sits between a client and a collection of backend services, acting as a reverse proxy to accept all API calls.",
    ),
    (
        "Containerization",
        "A form of OS virtualization where applications run in isolated user spaces called containers, sharing the same OS kernel.",
    ),
    (
        "Docker",
        "A platform that uses OS-level virtualization to deliver software in packages called containers.",
    ),
    (
        "Kubernetes",
        "An open-source container-orchestration system for automating application deployment, scaling, and management.",
    ),
    (
        "gRPC",
        "A high-performance, open-source universal RPC framework designed by Google.",
    ),
    (
        "Service Discovery",
        "The process of automatically detecting devices and services on a network, crucial for microservice architectures.",
    ),
];

const SEED_RELATIONSHIPS: [(&str, &str, RelationshipType); 8] = [
    ("API Gateway", "Microservice", RelationshipType::RelatedTo),
    ("Microservice", "API Gateway", RelationshipType::DependsOn),
    ("Service Discovery", "Microservice", RelationshipType::RelatedTo),
    ("Microservice", "Service Discovery", RelationshipType::DependsOn),
    ("Docker", "Containerization", RelationshipType::IsA),
    ("Kubernetes", "Containerization", RelationshipType::IsA),
    ("Kubernetes", "Docker", RelationshipType::RelatedTo),
    ("gRPC", "Microservice", RelationshipType::RelatedTo),
];

/// Spawn the background seeding task.
///
/// The task waits out the startup grace period, then retries while the
/// upstreams look unreachable. Seeding failure is logged and swallowed;
/// the gateway serves regardless.
pub fn spawn_seeder(
    glossary: GlossaryServiceClient<Channel>,
    engine: Arc<AggregationEngine>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(delay_secs = STARTUP_DELAY.as_secs(), "seeder waiting for the stack to come up");
        tokio::time::sleep(STARTUP_DELAY).await;

        for attempt in 1..=MAX_ATTEMPTS {
            match seed_once(glossary.clone(), &engine).await {
                Ok(()) => {
                    info!("seeding complete");
                    return;
                }
                Err(CoreError::Unavailable(reason)) if attempt < MAX_ATTEMPTS => {
                    warn!(attempt, %reason, "upstreams not ready, will retry seeding");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    error!(error = %e, "seeding failed");
                    return;
                }
            }
        }
    })
}

/// One full seeding pass.
///
/// Terms go in first; a name collision means a previous run got there and
/// the existing id is resolved instead. Edges then go through the engine,
/// so they face the same endpoint guard as any client write.
async fn seed_once(
    mut glossary: GlossaryServiceClient<Channel>,
    engine: &AggregationEngine,
) -> CoreResult<()> {
    let mut ids: HashMap<&str, TermId> = HashMap::new();

    for (name, definition) in SEED_TERMS {
        let request = Request::new(proto::AddTermRequest {
            name: name.to_string(),
            definition: definition.to_string(),
            source_url: None,
        });
        let id = match glossary.add_term(request).await {
            Ok(resp) => {
                let term = resp.into_inner();
                info!(name, id = %term.id, "seeded term");
                TermId::new(term.id)
            }
            Err(status) if status.code() == Code::AlreadyExists => {
                debug!(name, "term already present, resolving id");
                let resp = glossary
                    .get_term_by_name(Request::new(proto::GetTermByNameRequest {
                        name: name.to_string(),
                    }))
                    .await
                    .map_err(|s| core_from_status(&s))?;
                TermId::new(resp.into_inner().id)
            }
            Err(status) => return Err(core_from_status(&status)),
        };
        ids.insert(name, id);
    }

    let mut installed = 0usize;
    for (from_name, to_name, kind) in SEED_RELATIONSHIPS {
        let (from, to) = match (ids.get(from_name), ids.get(to_name)) {
            (Some(from), Some(to)) => (from.clone(), to.clone()),
            _ => {
                warn!(from = from_name, to = to_name, "skipping edge with unseeded endpoint");
                continue;
            }
        };

        let relationship = Relationship::new(from, to, kind);
        match engine.add_relationship(&relationship).await {
            Ok(()) => installed += 1,
            // An unreachable authority aborts the pass so the retry loop
            // can run it again from the top.
            Err(CoreError::Unavailable(reason)) => return Err(CoreError::Unavailable(reason)),
            Err(e) => {
                warn!(from = from_name, to = to_name, error = %e, "skipping edge");
            }
        }
    }

    info!(terms = ids.len(), relationships = installed, "seed data installed");
    Ok(())
}
