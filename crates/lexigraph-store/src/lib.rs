//! Lexigraph Storage Layer
//!
//! SQLite-backed persistence for the two authorities. Each authority owns
//! its own database file and schema:
//!
//! - [`TermStore`]: the glossary of terms (glossary service)
//! - [`GraphStore`]: the typed relationship edges (graph service)
//!
//! The two stores never share a connection or a file. Cross-store
//! consistency is a gateway policy, not a foreign key, so nothing in this
//! crate references both tables.
//!
//! Both stores also implement the domain ports ([`TermLookup`],
//! [`RelationshipGraph`]) so the aggregation engine can run against local
//! SQLite in tests exactly as it runs against remote services in
//! production.
//!
//! # Examples
//!
//! ```no_run
//! use lexigraph_store::TermStore;
//!
//! let store = TermStore::new(":memory:").unwrap();
//! let term = store.add_term("Docker", "A container runtime", None).unwrap();
//! assert!(!term.id.is_empty());
//! ```
//!
//! [`TermLookup`]: lexigraph_domain::TermLookup
//! [`RelationshipGraph`]: lexigraph_domain::RelationshipGraph

#![warn(missing_docs)]

use lexigraph_domain::CoreError;
use thiserror::Error;

mod graph;
mod terms;

pub use graph::GraphStore;
pub use terms::TermStore;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format or malformed input
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Uniqueness violation
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Relationship from a term to itself
    #[error("Self-referential relationship rejected for term '{0}'")]
    SelfLoop(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => CoreError::Storage(e.to_string()),
            StoreError::NotFound(what) => CoreError::NotFound(what),
            StoreError::InvalidData(what) => CoreError::Invalid(what),
            StoreError::Duplicate(what) => CoreError::Duplicate(what),
            StoreError::SelfLoop(id) => CoreError::SelfLoop(id.into()),
        }
    }
}

/// True when the underlying SQLite error is a UNIQUE/PRIMARY KEY violation.
fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_maps_onto_core_error() {
        let err: CoreError = StoreError::NotFound("term t1".to_string()).into();
        assert!(matches!(err, CoreError::NotFound(_)));

        let err: CoreError = StoreError::Duplicate("Docker".to_string()).into();
        assert!(matches!(err, CoreError::Duplicate(_)));

        let err: CoreError = StoreError::SelfLoop("t1".to_string()).into();
        assert!(matches!(err, CoreError::SelfLoop(_)));
    }
}
