//! SQLite store for relationship edges

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use lexigraph_domain::{CoreResult, Relationship, RelationshipGraph, RelationshipType, TermId};
use rusqlite::{params, Connection, Row};

use crate::StoreError;

/// SQLite-based relationship graph.
///
/// Edges are keyed by the ordered pair `(from, to)`; writing the same pair
/// twice replaces the kind. Endpoints are opaque term ids and nothing here
/// verifies they exist in the glossary, which is a different database owned
/// by a different service.
pub struct GraphStore {
    conn: Mutex<Connection>,
}

impl GraphStore {
    /// Open (or create) the graph database at `path`.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("graph_schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Upsert an edge.
    ///
    /// Self-loops and empty endpoints are rejected before touching the
    /// database so they can never be persisted, whatever path they arrive
    /// by.
    pub fn upsert_relationship(&self, relationship: &Relationship) -> Result<(), StoreError> {
        validate_endpoints(&relationship.from, &relationship.to)?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO relationships (from_term_id, to_term_id, kind) VALUES (?1, ?2, ?3)
             ON CONFLICT(from_term_id, to_term_id) DO UPDATE SET kind = excluded.kind",
            params![
                relationship.from.as_str(),
                relationship.to.as_str(),
                relationship.kind.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Every edge touching the term, in either direction.
    ///
    /// Insertion order (SQLite rowid) is preserved so repeated reads of an
    /// unchanged graph return the same sequence.
    pub fn relationships_for_term(&self, id: &TermId) -> Result<Vec<Relationship>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT from_term_id, to_term_id, kind FROM relationships
             WHERE from_term_id = ?1 OR to_term_id = ?1
             ORDER BY rowid",
        )?;
        let relationships = stmt
            .query_map(params![id.as_str()], row_to_relationship)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(relationships)
    }

    /// Remove the edge `(from, to)`, reporting whether one was present.
    pub fn remove_relationship(&self, from: &TermId, to: &TermId) -> Result<bool, StoreError> {
        validate_endpoints(from, to)?;

        let conn = self.conn.lock().unwrap();
        let removed = conn.execute(
            "DELETE FROM relationships WHERE from_term_id = ?1 AND to_term_id = ?2",
            params![from.as_str(), to.as_str()],
        )?;
        Ok(removed > 0)
    }

    /// Remove every edge touching the term, returning how many went.
    pub fn purge_edges_for_term(&self, id: &TermId) -> Result<u64, StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidData("term id is required".to_string()));
        }

        let conn = self.conn.lock().unwrap();
        let removed = conn.execute(
            "DELETE FROM relationships WHERE from_term_id = ?1 OR to_term_id = ?1",
            params![id.as_str()],
        )?;
        Ok(removed as u64)
    }

    /// Number of edges in the graph.
    pub fn relationship_count(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock().unwrap();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM relationships", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn validate_endpoints(from: &TermId, to: &TermId) -> Result<(), StoreError> {
    if from.is_empty() || to.is_empty() {
        return Err(StoreError::InvalidData(
            "both endpoint term ids are required".to_string(),
        ));
    }
    if from == to {
        return Err(StoreError::SelfLoop(from.to_string()));
    }
    Ok(())
}

fn row_to_relationship(row: &Row<'_>) -> rusqlite::Result<Relationship> {
    let kind_str: String = row.get(2)?;
    let kind = RelationshipType::parse(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown relationship kind '{}'", kind_str).into(),
        )
    })?;

    Ok(Relationship {
        from: TermId::new(row.get::<_, String>(0)?),
        to: TermId::new(row.get::<_, String>(1)?),
        kind,
    })
}

#[async_trait]
impl RelationshipGraph for GraphStore {
    async fn add_relationship(&self, relationship: &Relationship) -> CoreResult<()> {
        Ok(self.upsert_relationship(relationship)?)
    }

    async fn relationships_for_term(&self, id: &TermId) -> CoreResult<Vec<Relationship>> {
        Ok(GraphStore::relationships_for_term(self, id)?)
    }

    async fn delete_relationship(&self, from: &TermId, to: &TermId) -> CoreResult<()> {
        self.remove_relationship(from, to)?;
        Ok(())
    }

    async fn purge_term(&self, id: &TermId) -> CoreResult<u64> {
        Ok(self.purge_edges_for_term(id)?)
    }
}
