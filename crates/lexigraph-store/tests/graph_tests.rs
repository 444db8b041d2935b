//! Integration tests for the relationship graph store
//!
//! These tests verify upsert-by-pair edge identity, directional deletes,
//! purging, and the RelationshipGraph port implementation.

use std::sync::Arc;

use lexigraph_domain::{Relationship, RelationshipGraph, RelationshipType, TermId};
use lexigraph_store::{GraphStore, StoreError};

fn edge(from: &str, to: &str, kind: RelationshipType) -> Relationship {
    Relationship::new(TermId::new(from), TermId::new(to), kind)
}

#[test]
fn test_store_initialization() {
    let store = GraphStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_upsert_creates_then_replaces() {
    let store = GraphStore::new(":memory:").unwrap();

    store
        .upsert_relationship(&edge("a", "b", RelationshipType::RelatedTo))
        .unwrap();
    assert_eq!(store.relationship_count().unwrap(), 1);

    // Same ordered pair: the kind is replaced, no parallel edge appears.
    store
        .upsert_relationship(&edge("a", "b", RelationshipType::DependsOn))
        .unwrap();
    assert_eq!(store.relationship_count().unwrap(), 1);

    let edges = store.relationships_for_term(&TermId::new("a")).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].kind, RelationshipType::DependsOn);
}

#[test]
fn test_reverse_direction_is_a_distinct_edge() {
    let store = GraphStore::new(":memory:").unwrap();

    store
        .upsert_relationship(&edge("a", "b", RelationshipType::IsA))
        .unwrap();
    store
        .upsert_relationship(&edge("b", "a", RelationshipType::Contains))
        .unwrap();

    assert_eq!(store.relationship_count().unwrap(), 2);
}

#[test]
fn test_self_loop_rejected() {
    let store = GraphStore::new(":memory:").unwrap();

    let result = store.upsert_relationship(&edge("a", "a", RelationshipType::Synonym));
    assert!(matches!(result, Err(StoreError::SelfLoop(_))));
    assert_eq!(store.relationship_count().unwrap(), 0);
}

#[test]
fn test_empty_endpoints_rejected() {
    let store = GraphStore::new(":memory:").unwrap();

    assert!(matches!(
        store.upsert_relationship(&edge("", "b", RelationshipType::IsA)),
        Err(StoreError::InvalidData(_))
    ));
    assert!(matches!(
        store.upsert_relationship(&edge("a", "", RelationshipType::IsA)),
        Err(StoreError::InvalidData(_))
    ));
    assert!(matches!(
        store.remove_relationship(&TermId::new(""), &TermId::new("b")),
        Err(StoreError::InvalidData(_))
    ));
}

#[test]
fn test_relationships_for_term_covers_both_directions() {
    let store = GraphStore::new(":memory:").unwrap();

    store.upsert_relationship(&edge("docker", "containerization", RelationshipType::IsA)).unwrap();
    store.upsert_relationship(&edge("kubernetes", "docker", RelationshipType::DependsOn)).unwrap();
    store.upsert_relationship(&edge("kubernetes", "containerization", RelationshipType::RelatedTo)).unwrap();

    let edges = store.relationships_for_term(&TermId::new("docker")).unwrap();
    assert_eq!(edges.len(), 2, "Out-edges and in-edges both count");

    // Insertion order is stable across repeated reads.
    let again = store.relationships_for_term(&TermId::new("docker")).unwrap();
    assert_eq!(edges, again);
    assert_eq!(edges[0].from, TermId::new("docker"));
    assert_eq!(edges[1].from, TermId::new("kubernetes"));
}

#[test]
fn test_unknown_term_yields_empty() {
    let store = GraphStore::new(":memory:").unwrap();

    let edges = store.relationships_for_term(&TermId::new("ghost")).unwrap();
    assert!(edges.is_empty());
}

#[test]
fn test_remove_relationship_is_directional_and_idempotent() {
    let store = GraphStore::new(":memory:").unwrap();

    store.upsert_relationship(&edge("a", "b", RelationshipType::IsA)).unwrap();
    store.upsert_relationship(&edge("b", "a", RelationshipType::Contains)).unwrap();

    // Only the (a, b) direction goes.
    assert!(store.remove_relationship(&TermId::new("a"), &TermId::new("b")).unwrap());
    assert_eq!(store.relationship_count().unwrap(), 1);

    // Removing it again is a quiet no-op.
    assert!(!store.remove_relationship(&TermId::new("a"), &TermId::new("b")).unwrap());
    assert_eq!(store.relationship_count().unwrap(), 1);
}

#[test]
fn test_purge_edges_for_term() {
    let store = GraphStore::new(":memory:").unwrap();

    store.upsert_relationship(&edge("docker", "containerization", RelationshipType::IsA)).unwrap();
    store.upsert_relationship(&edge("kubernetes", "docker", RelationshipType::DependsOn)).unwrap();
    store.upsert_relationship(&edge("kubernetes", "containerization", RelationshipType::RelatedTo)).unwrap();

    let removed = store.purge_edges_for_term(&TermId::new("docker")).unwrap();
    assert_eq!(removed, 2, "Both directions purged");
    assert_eq!(store.relationship_count().unwrap(), 1, "Unrelated edge survives");

    // Purging a term with no edges reports zero.
    assert_eq!(store.purge_edges_for_term(&TermId::new("docker")).unwrap(), 0);
}

#[test]
fn test_persistence_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.db");

    {
        let store = GraphStore::new(&path).unwrap();
        store.upsert_relationship(&edge("a", "b", RelationshipType::Synonym)).unwrap();
    }

    let reopened = GraphStore::new(&path).unwrap();
    let edges = reopened.relationships_for_term(&TermId::new("a")).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].kind, RelationshipType::Synonym);
}

#[tokio::test]
async fn test_relationship_graph_port() {
    let store = GraphStore::new(":memory:").unwrap();
    let graph: Arc<dyn RelationshipGraph> = Arc::new(store);

    graph
        .add_relationship(&edge("a", "b", RelationshipType::IsA))
        .await
        .unwrap();

    let edges = graph.relationships_for_term(&TermId::new("a")).await.unwrap();
    assert_eq!(edges.len(), 1);

    graph
        .delete_relationship(&TermId::new("a"), &TermId::new("b"))
        .await
        .unwrap();
    // Deleting the now-absent edge still succeeds through the port.
    graph
        .delete_relationship(&TermId::new("a"), &TermId::new("b"))
        .await
        .unwrap();

    graph.add_relationship(&edge("a", "b", RelationshipType::IsA)).await.unwrap();
    graph.add_relationship(&edge("c", "a", RelationshipType::Contains)).await.unwrap();
    let purged = graph.purge_term(&TermId::new("a")).await.unwrap();
    assert_eq!(purged, 2);
}
