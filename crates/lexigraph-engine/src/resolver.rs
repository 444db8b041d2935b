//! Cross-store consistency policy
//!
//! The graph authority stores edges between opaque ids and the glossary
//! stores terms; neither enforces anything about the other. The resolver is
//! the one place that policy lives:
//!
//! - writes are guarded up front (both endpoints must resolve to terms)
//! - reads are filtered (endpoints that no longer resolve hide their edges)
//! - term deletion triggers a best-effort purge of the orphaned edges
//!
//! Windows between these still exist (a term can vanish between guard and
//! write), which is why the read-side filter is not optional.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Semaphore;

use lexigraph_domain::{
    CoreError, CoreResult, Relationship, RelationshipGraph, Term, TermId, TermLookup,
};

use crate::engine::DEFAULT_FAN_OUT;

/// Applies the cross-store consistency rules over a pair of ports.
#[derive(Clone)]
pub struct ConsistencyResolver {
    lookup: Arc<dyn TermLookup>,
    graph: Arc<dyn RelationshipGraph>,
    fan_out: usize,
}

impl ConsistencyResolver {
    /// Build a resolver with the default lookup fan-out.
    pub fn new(lookup: Arc<dyn TermLookup>, graph: Arc<dyn RelationshipGraph>) -> Self {
        Self::with_fan_out(lookup, graph, DEFAULT_FAN_OUT)
    }

    /// Build a resolver with an explicit cap on concurrent term lookups.
    pub fn with_fan_out(
        lookup: Arc<dyn TermLookup>,
        graph: Arc<dyn RelationshipGraph>,
        fan_out: usize,
    ) -> Self {
        Self {
            lookup,
            graph,
            fan_out: fan_out.max(1),
        }
    }

    /// Validate a relationship before it is written.
    ///
    /// Checks run cheapest-first and the first failure wins: empty ids,
    /// then self-loops, then existence of `from`, then existence of `to`.
    /// Shape errors are therefore reported even when the glossary is
    /// unreachable. A lookup failure surfaces as
    /// [`CoreError::Unavailable`], never as a phantom missing term.
    pub async fn guard_new_edge(&self, relationship: &Relationship) -> CoreResult<()> {
        if relationship.from.is_empty() || relationship.to.is_empty() {
            return Err(CoreError::Invalid(
                "both endpoint term ids are required".to_string(),
            ));
        }
        if relationship.is_self_loop() {
            return Err(CoreError::SelfLoop(relationship.from.clone()));
        }
        if !self.lookup.exists(&relationship.from).await? {
            return Err(CoreError::DanglingReference(relationship.from.clone()));
        }
        if !self.lookup.exists(&relationship.to).await? {
            return Err(CoreError::DanglingReference(relationship.to.clone()));
        }
        Ok(())
    }

    /// Resolve a set of term ids against the glossary, in parallel.
    ///
    /// At most `fan_out` lookups are in flight at once; all of them are
    /// joined before returning, so the caller sees one complete answer.
    /// Ids that do not resolve are simply absent from the result: for a
    /// composed read, "term gone" and "lookup failed" both mean the
    /// neighbor cannot be shown. Failures are logged, not propagated.
    pub async fn resolve_live(&self, ids: HashSet<TermId>) -> HashMap<TermId, Term> {
        let semaphore = Arc::new(Semaphore::new(self.fan_out));
        let mut handles = Vec::with_capacity(ids.len());

        for id in ids {
            let lookup = Arc::clone(&self.lookup);
            let semaphore = Arc::clone(&semaphore);
            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return None,
                };
                match lookup.get_by_id(&id).await {
                    Ok(Some(term)) => Some(term),
                    Ok(None) => {
                        tracing::debug!(term_id = %id, "endpoint has no glossary term, hiding it");
                        None
                    }
                    Err(err) => {
                        tracing::warn!(term_id = %id, error = %err, "endpoint lookup failed, hiding it");
                        None
                    }
                }
            }));
        }

        let mut live = HashMap::with_capacity(handles.len());
        for handle in handles {
            if let Ok(Some(term)) = handle.await {
                live.insert(term.id.clone(), term);
            }
        }
        live
    }

    /// Purge the graph of edges touching a deleted term.
    ///
    /// Runs on its own task so a client hanging up after the delete cannot
    /// cancel the cleanup mid-flight. The purge never fails the caller:
    /// errors are logged and reported as zero removals, and the read-side
    /// filter keeps any surviving edges invisible until a later purge.
    pub async fn purge_after_term_delete(&self, id: &TermId) -> u64 {
        let graph = Arc::clone(&self.graph);
        let id = id.clone();

        let purge = tokio::spawn(async move {
            match graph.purge_term(&id).await {
                Ok(removed) => {
                    tracing::info!(term_id = %id, removed, "purged edges after term delete");
                    removed
                }
                Err(err) => {
                    tracing::warn!(term_id = %id, error = %err, "edge purge failed");
                    0
                }
            }
        });

        purge.await.unwrap_or(0)
    }
}
