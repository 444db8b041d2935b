//! Lexigraph Domain Layer
//!
//! This crate contains the core vocabulary model shared by every Lexigraph
//! service: glossary terms, typed relationships between terms, and the
//! composed views built from both. It also defines the port traits that the
//! infrastructure layers (SQLite stores, gRPC client adapters) implement.
//!
//! ## Key Concepts
//!
//! - **Term**: A canonical glossary entry (id, name, definition)
//! - **Relationship**: A directed, typed edge between two term ids
//! - **Mind map**: A one-hop neighborhood view centered on a term
//! - **Ports**: `TermLookup` and `RelationshipGraph`, the seams between the
//!   aggregation logic and whatever actually holds the data
//!
//! ## Architecture
//!
//! Terms and relationships live in separate authorities that never talk to
//! each other. Referential integrity across the two is a policy applied by
//! the composition layer, not a database constraint, which is why the error
//! taxonomy here distinguishes dangling references and unreachable upstreams
//! from plain not-found.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mindmap;
pub mod relationship;
pub mod term;
pub mod traits;

// Re-exports for convenience
pub use error::{CoreError, CoreResult};
pub use mindmap::{MindMap, MindMapEdge, MindMapNode};
pub use relationship::{Relationship, RelationshipType};
pub use term::{Term, TermId};
pub use traits::{RelationshipGraph, TermLookup};
