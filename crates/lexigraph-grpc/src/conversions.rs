//! Type conversions between proto and domain types
//!
//! Handles bidirectional conversion between gRPC protobuf types and internal
//! domain types. The relationship kind enum is closed: converters reject
//! unknown and unspecified tags instead of guessing.

use lexigraph_domain::{MindMapEdge, MindMapNode, Relationship, RelationshipType, Term, TermId};

use crate::proto;

/// Error type for conversion failures
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or unspecified relationship type tag
    #[error("Invalid relationship type tag: {0}")]
    InvalidRelationshipType(i32),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Convert a domain relationship kind to the proto enum
pub fn relationship_type_to_proto(kind: RelationshipType) -> proto::RelationshipType {
    match kind {
        RelationshipType::RelatedTo => proto::RelationshipType::RelatedTo,
        RelationshipType::Synonym => proto::RelationshipType::Synonym,
        RelationshipType::Antonym => proto::RelationshipType::Antonym,
        RelationshipType::IsA => proto::RelationshipType::IsA,
        RelationshipType::Contains => proto::RelationshipType::Contains,
        RelationshipType::DependsOn => proto::RelationshipType::DependsOn,
    }
}

/// Convert a raw proto enum tag to a domain relationship kind
///
/// The zero (unspecified) tag is rejected: writers must say what they mean.
pub fn relationship_type_from_proto(tag: i32) -> Result<RelationshipType, ConversionError> {
    let proto_kind = proto::RelationshipType::try_from(tag)
        .map_err(|_| ConversionError::InvalidRelationshipType(tag))?;

    match proto_kind {
        proto::RelationshipType::Unspecified => {
            Err(ConversionError::InvalidRelationshipType(tag))
        }
        proto::RelationshipType::RelatedTo => Ok(RelationshipType::RelatedTo),
        proto::RelationshipType::Synonym => Ok(RelationshipType::Synonym),
        proto::RelationshipType::Antonym => Ok(RelationshipType::Antonym),
        proto::RelationshipType::IsA => Ok(RelationshipType::IsA),
        proto::RelationshipType::Contains => Ok(RelationshipType::Contains),
        proto::RelationshipType::DependsOn => Ok(RelationshipType::DependsOn),
    }
}

/// Convert a domain term to its proto message
pub fn term_to_proto(term: Term) -> proto::Term {
    proto::Term {
        id: term.id.into_string(),
        name: term.name,
        definition: term.definition,
        source_url: term.source_url,
    }
}

/// Convert a proto term to the domain type
///
/// Used when decoding upstream responses, so a blank id is treated as a
/// malformed message rather than silently accepted.
pub fn term_from_proto(term: proto::Term) -> Result<Term, ConversionError> {
    if term.id.is_empty() {
        return Err(ConversionError::MissingField("id"));
    }

    Ok(Term {
        id: TermId::new(term.id),
        name: term.name,
        definition: term.definition,
        source_url: term.source_url,
    })
}

/// Convert a domain relationship to its proto message
pub fn relationship_to_proto(relationship: Relationship) -> proto::Relationship {
    proto::Relationship {
        from_term_id: relationship.from.into_string(),
        to_term_id: relationship.to.into_string(),
        r#type: relationship_type_to_proto(relationship.kind) as i32,
    }
}

/// Convert a proto relationship to the domain type
pub fn relationship_from_proto(
    relationship: proto::Relationship,
) -> Result<Relationship, ConversionError> {
    let kind = relationship_type_from_proto(relationship.r#type)?;
    Ok(Relationship {
        from: TermId::new(relationship.from_term_id),
        to: TermId::new(relationship.to_term_id),
        kind,
    })
}

/// Convert a mind-map node to its proto message
pub fn node_to_proto(node: MindMapNode) -> proto::Node {
    proto::Node {
        id: node.id.into_string(),
        name: node.name,
        definition: node.definition,
    }
}

/// Convert a mind-map edge to its proto message
pub fn edge_to_proto(edge: MindMapEdge) -> proto::Edge {
    proto::Edge {
        from_id: edge.from_id.into_string(),
        to_id: edge.to_id.into_string(),
        label: edge.label,
    }
}
