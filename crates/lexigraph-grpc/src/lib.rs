#![warn(missing_docs)]

//! Lexigraph gRPC Wire Layer
//!
//! Holds the generated protobuf types for all three services plus the
//! conversions between wire and domain representations:
//! - `proto`: generated messages, clients, and server traits
//! - `conversions`: proto <-> domain type mapping
//! - `status`: the single CoreError <-> gRPC status code table
//!
//! Every service binary and client adapter goes through this crate, so the
//! status table here is the one place where error semantics and the wire
//! agree.

// Include generated protobuf code
pub mod proto {
    //! Generated protobuf types and service definitions
    tonic::include_proto!("lexigraph.v1");
}

pub mod conversions;
pub mod status;

pub use status::{core_from_status, status_from_core};
