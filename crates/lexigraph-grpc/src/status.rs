//! The CoreError <-> gRPC status table
//!
//! Every service maps errors through these two functions, which is what
//! keeps the taxonomy observable: a client can always tell a missing record
//! (NOT_FOUND) from a rejected write (INVALID_ARGUMENT /
//! FAILED_PRECONDITION) from an unreachable upstream (UNAVAILABLE).

use lexigraph_domain::CoreError;
use tonic::{Code, Status};

/// Map a domain error onto its gRPC status.
pub fn status_from_core(err: CoreError) -> Status {
    let message = err.to_string();
    match err {
        CoreError::NotFound(_) => Status::not_found(message),
        CoreError::SelfLoop(_) => Status::invalid_argument(message),
        CoreError::Invalid(_) => Status::invalid_argument(message),
        CoreError::DanglingReference(_) => Status::failed_precondition(message),
        CoreError::Unavailable(_) => Status::unavailable(message),
        CoreError::Duplicate(_) => Status::already_exists(message),
        CoreError::Storage(_) => Status::internal(message),
    }
}

/// Map a status received from an upstream authority back onto the domain.
///
/// Used by the gateway's client adapters. Codes that carry no domain
/// meaning here (internal faults, timeouts, cancellations) collapse into
/// `Unavailable`: from the gateway's seat, the upstream failed to answer.
pub fn core_from_status(status: &Status) -> CoreError {
    let message = status.message().to_string();
    match status.code() {
        Code::NotFound => CoreError::NotFound(message),
        Code::InvalidArgument => CoreError::Invalid(message),
        Code::AlreadyExists => CoreError::Duplicate(message),
        code => CoreError::Unavailable(format!("{:?}: {}", code, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexigraph_domain::TermId;

    #[test]
    fn test_each_variant_has_one_code() {
        let cases: Vec<(CoreError, Code)> = vec![
            (CoreError::NotFound("term t1".into()), Code::NotFound),
            (CoreError::SelfLoop(TermId::new("t1")), Code::InvalidArgument),
            (CoreError::Invalid("empty id".into()), Code::InvalidArgument),
            (
                CoreError::DanglingReference(TermId::new("t1")),
                Code::FailedPrecondition,
            ),
            (CoreError::Unavailable("refused".into()), Code::Unavailable),
            (CoreError::Duplicate("Docker".into()), Code::AlreadyExists),
            (CoreError::Storage("disk".into()), Code::Internal),
        ];

        for (err, code) in cases {
            assert_eq!(status_from_core(err).code(), code);
        }
    }

    #[test]
    fn test_status_message_carries_detail() {
        let status = status_from_core(CoreError::DanglingReference(TermId::new("ghost")));
        assert!(status.message().contains("ghost"));
    }

    #[test]
    fn test_reverse_mapping() {
        let err = core_from_status(&Status::not_found("term t1"));
        assert!(matches!(err, CoreError::NotFound(_)));

        let err = core_from_status(&Status::invalid_argument("bad"));
        assert!(matches!(err, CoreError::Invalid(_)));

        let err = core_from_status(&Status::already_exists("Docker"));
        assert!(matches!(err, CoreError::Duplicate(_)));
    }

    #[test]
    fn test_opaque_upstream_failures_become_unavailable() {
        for status in [
            Status::internal("boom"),
            Status::deadline_exceeded("slow"),
            Status::unavailable("refused"),
            Status::unknown("transport error"),
        ] {
            let err = core_from_status(&status);
            assert!(
                matches!(err, CoreError::Unavailable(_)),
                "{:?} should collapse to Unavailable",
                status.code()
            );
        }
    }
}
