//! Mind map module - the composed one-hop neighborhood view

use crate::term::{Term, TermId};

/// A term rendered as a mind-map node.
///
/// Nodes are a projection of [`Term`]: composition drops `source_url`
/// because the view is built for display, not authoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MindMapNode {
    /// Term id
    pub id: TermId,

    /// Term name
    pub name: String,

    /// Term definition
    pub definition: String,
}

impl From<Term> for MindMapNode {
    fn from(term: Term) -> Self {
        Self {
            id: term.id,
            name: term.name,
            definition: term.definition,
        }
    }
}

/// A labeled edge in the mind map.
///
/// `label` is the wire spelling of the relationship kind, e.g. `IS_A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MindMapEdge {
    /// Source node id
    pub from_id: TermId,

    /// Target node id
    pub to_id: TermId,

    /// Relationship kind label
    pub label: String,
}

/// One-hop neighborhood of a center term.
///
/// Every edge's endpoints are guaranteed to appear in `nodes`; neighbors
/// that could not be resolved against the glossary are filtered out along
/// with their edges before the view is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MindMap {
    /// Center term plus every resolvable neighbor, deduplicated by id
    pub nodes: Vec<MindMapNode>,

    /// Edges whose endpoints all appear in `nodes`
    pub edges: Vec<MindMapEdge>,
}

impl MindMap {
    /// True when a node with the given id is present.
    pub fn contains_node(&self, id: &TermId) -> bool {
        self.nodes.iter().any(|node| &node.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_projection_drops_source_url() {
        let term = Term::new(TermId::new("t1"), "gRPC", "An RPC framework")
            .with_source_url("https://grpc.io");
        let node = MindMapNode::from(term);

        assert_eq!(node.id, TermId::new("t1"));
        assert_eq!(node.name, "gRPC");
        assert_eq!(node.definition, "An RPC framework");
    }

    #[test]
    fn test_contains_node() {
        let map = MindMap {
            nodes: vec![MindMapNode {
                id: TermId::new("t1"),
                name: "Docker".to_string(),
                definition: "A container runtime".to_string(),
            }],
            edges: vec![],
        };

        assert!(map.contains_node(&TermId::new("t1")));
        assert!(!map.contains_node(&TermId::new("t2")));
    }
}
