//! Error taxonomy shared across services

use thiserror::Error;

use crate::term::TermId;

/// Top-level error type for Lexigraph operations.
///
/// Every port implementation and the aggregation engine speak this type;
/// the gRPC layer maps each variant onto exactly one status code, so the
/// distinctions here are the distinctions callers can observe. In
/// particular `NotFound` (the record does not exist) is kept separate from
/// `Unavailable` (we could not ask), and `DanglingReference` names the
/// cross-store case where an edge endpoint has no backing term.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A relationship may not connect a term to itself.
    #[error("self-referential relationship rejected for term '{0}'")]
    SelfLoop(TermId),

    /// An edge endpoint has no corresponding glossary term.
    #[error("term '{0}' does not exist in the glossary")]
    DanglingReference(TermId),

    /// A collaborating service could not be reached or failed mid-call.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// The request itself is malformed (empty ids, blank names, ...).
    #[error("invalid input: {0}")]
    Invalid(String),

    /// A uniqueness rule was violated.
    #[error("already exists: {0}")]
    Duplicate(String),

    /// The local persistence layer failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type alias for Lexigraph operations.
pub type CoreResult<T> = Result<T, CoreError>;
