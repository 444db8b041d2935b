//! Lexigraph Aggregation Engine
//!
//! The composition core of the system. The glossary and the relationship
//! graph are separate authorities with no knowledge of each other; this
//! crate is where their data meets and where the cross-store consistency
//! rules live:
//!
//! - [`ConsistencyResolver`]: the policy layer. Guards relationship writes
//!   (endpoints must name real terms), filters reads (edges to vanished
//!   terms are hidden), and runs the best-effort purge after a term is
//!   deleted.
//! - [`AggregationEngine`]: the operations. Enriched term fetch, one-hop
//!   mind maps with bounded parallel neighbor resolution, and guarded
//!   relationship writes.
//!
//! Everything here works against the domain ports ([`TermLookup`],
//! [`RelationshipGraph`]), so the same engine runs over local SQLite in
//! tests and over gRPC clients in the gateway.
//!
//! [`TermLookup`]: lexigraph_domain::TermLookup
//! [`RelationshipGraph`]: lexigraph_domain::RelationshipGraph

#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;
mod resolver;

pub use engine::{AggregationEngine, EnrichedTerm, TermSelector, DEFAULT_FAN_OUT};
pub use resolver::ConsistencyResolver;
