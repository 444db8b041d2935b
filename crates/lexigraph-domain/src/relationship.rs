//! Relationship module - directed, typed edges between terms

use std::fmt;

use crate::term::TermId;

/// Type of relationship between two terms.
///
/// The set is closed: unknown kinds are rejected at the edges of the system
/// rather than stored and reinterpreted later. String forms use the wire
/// spelling (`IS_A`, `DEPENDS_ON`, ...) which is also what mind-map edge
/// labels carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    /// Loose association, the weakest link kind
    RelatedTo,

    /// Terms that mean the same thing
    Synonym,

    /// Terms that mean the opposite thing
    Antonym,

    /// Taxonomic: `from` is a kind of `to`
    IsA,

    /// Compositional: `from` contains `to`
    Contains,

    /// Operational: `from` depends on `to`
    DependsOn,
}

impl RelationshipType {
    /// Every kind, in wire-tag order. Handy for seeding and tests.
    pub const ALL: [RelationshipType; 6] = [
        RelationshipType::RelatedTo,
        RelationshipType::Synonym,
        RelationshipType::Antonym,
        RelationshipType::IsA,
        RelationshipType::Contains,
        RelationshipType::DependsOn,
    ];

    /// Get the canonical (wire) spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::RelatedTo => "RELATED_TO",
            RelationshipType::Synonym => "SYNONYM",
            RelationshipType::Antonym => "ANTONYM",
            RelationshipType::IsA => "IS_A",
            RelationshipType::Contains => "CONTAINS",
            RelationshipType::DependsOn => "DEPENDS_ON",
        }
    }

    /// Parse a kind from its canonical spelling (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "RELATED_TO" => Some(RelationshipType::RelatedTo),
            "SYNONYM" => Some(RelationshipType::Synonym),
            "ANTONYM" => Some(RelationshipType::Antonym),
            "IS_A" => Some(RelationshipType::IsA),
            "CONTAINS" => Some(RelationshipType::Contains),
            "DEPENDS_ON" => Some(RelationshipType::DependsOn),
            _ => None,
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relationship type: {}", s))
    }
}

/// A directed, typed edge between two terms.
///
/// Edge identity is the ordered pair `(from, to)`: writing a second edge
/// between the same pair replaces the kind rather than adding a parallel
/// edge. The reverse direction is a distinct edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Source term id
    pub from: TermId,

    /// Target term id
    pub to: TermId,

    /// Kind of connection
    pub kind: RelationshipType,
}

impl Relationship {
    /// Create a new relationship.
    pub fn new(from: TermId, to: TermId, kind: RelationshipType) -> Self {
        Self { from, to, kind }
    }

    /// True when the edge starts and ends at the same term.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// True when either endpoint is the given term.
    pub fn involves(&self, id: &TermId) -> bool {
        &self.from == id || &self.to == id
    }

    /// The endpoint opposite `id`, or `None` when `id` is not an endpoint.
    ///
    /// For a self-loop on `id`, returns `id` itself.
    pub fn other_endpoint(&self, id: &TermId) -> Option<&TermId> {
        if &self.from == id {
            Some(&self.to)
        } else if &self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_kind() -> impl Strategy<Value = RelationshipType> {
        proptest::sample::select(RelationshipType::ALL.to_vec())
    }

    proptest! {
        /// Property: the canonical spelling round-trips through parse
        #[test]
        fn test_wire_spelling_round_trip(kind in any_kind()) {
            prop_assert_eq!(RelationshipType::parse(kind.as_str()), Some(kind));
        }

        /// Property: each endpoint's opposite is the other endpoint
        #[test]
        fn test_other_endpoint_symmetry(from in "[a-z]{1,8}", to in "[A-Z]{1,8}", kind in any_kind()) {
            // Disjoint alphabets keep the endpoints distinct.
            let from_id = TermId::new(from);
            let to_id = TermId::new(to);
            let rel = Relationship::new(from_id.clone(), to_id.clone(), kind);

            prop_assert_eq!(rel.other_endpoint(&from_id), Some(&to_id));
            prop_assert_eq!(rel.other_endpoint(&to_id), Some(&from_id));
            prop_assert!(!rel.is_self_loop());
        }
    }
}
