//! Port traits between the aggregation logic and infrastructure
//!
//! Both ports have two kinds of implementation: the SQLite stores inside the
//! authorities (lexigraph-store) and the gRPC client adapters inside the
//! gateway (lexigraph-gateway). The aggregation engine only ever sees these
//! traits, so it composes identically in-process and across the network.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::relationship::Relationship;
use crate::term::{Term, TermId};

/// Read-side access to the glossary of terms.
///
/// Implementations translate transport failures into
/// [`CoreError::Unavailable`](crate::CoreError::Unavailable) so callers can
/// tell "no such term" apart from "could not ask".
#[async_trait]
pub trait TermLookup: Send + Sync {
    /// Cheap existence probe for an id.
    async fn exists(&self, id: &TermId) -> CoreResult<bool>;

    /// Fetch a term by id. Absence is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: &TermId) -> CoreResult<Option<Term>>;

    /// Fetch a term by its unique name. Absence is `Ok(None)`.
    async fn get_by_name(&self, name: &str) -> CoreResult<Option<Term>>;

    /// Substring search over names and definitions.
    ///
    /// An empty query matches nothing.
    async fn search(&self, query: &str) -> CoreResult<Vec<Term>>;
}

/// The typed relationship graph between term ids.
#[async_trait]
pub trait RelationshipGraph: Send + Sync {
    /// Record an edge.
    ///
    /// Edge identity is the ordered pair `(from, to)`: if that pair already
    /// has an edge, its kind is replaced (last write wins). Self-loops and
    /// empty endpoints are rejected. The graph does not check that the
    /// endpoints name real terms; that policy lives with the caller.
    async fn add_relationship(&self, relationship: &Relationship) -> CoreResult<()>;

    /// Every edge touching the term, in either direction, in insertion
    /// order. Unknown terms yield an empty list.
    async fn relationships_for_term(&self, id: &TermId) -> CoreResult<Vec<Relationship>>;

    /// Remove the edge `(from, to)` if present. Removing an absent edge is
    /// not an error.
    async fn delete_relationship(&self, from: &TermId, to: &TermId) -> CoreResult<()>;

    /// Remove every edge touching the term, returning how many went.
    async fn purge_term(&self, id: &TermId) -> CoreResult<u64>;
}
