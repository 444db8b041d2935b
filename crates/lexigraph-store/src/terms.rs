//! SQLite store for glossary terms

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use lexigraph_domain::{CoreResult, Term, TermId, TermLookup};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{is_constraint_violation, StoreError};

/// SQLite-based glossary of terms.
///
/// The connection sits behind a `Mutex` so the store can be shared across
/// request handlers; SQLite serializes writers anyway, and every operation
/// here is a single short statement.
pub struct TermStore {
    conn: Mutex<Connection>,
}

impl TermStore {
    /// Open (or create) the glossary database at `path`.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("terms_schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a new term, minting a fresh id for it.
    ///
    /// Fails with [`StoreError::Duplicate`] when the name is already taken
    /// and [`StoreError::InvalidData`] when name or definition is empty.
    pub fn add_term(
        &self,
        name: &str,
        definition: &str,
        source_url: Option<&str>,
    ) -> Result<Term, StoreError> {
        if name.is_empty() || definition.is_empty() {
            return Err(StoreError::InvalidData(
                "name and definition are required".to_string(),
            ));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let conn = self.conn.lock().unwrap();
        let inserted = conn.execute(
            "INSERT INTO terms (id, name, definition, source_url) VALUES (?1, ?2, ?3, ?4)",
            params![&id, name, definition, source_url],
        );

        match inserted {
            Ok(_) => Ok(Term {
                id: TermId::new(id),
                name: name.to_string(),
                definition: definition.to_string(),
                source_url: source_url.map(str::to_string),
            }),
            Err(e) if is_constraint_violation(&e) => {
                Err(StoreError::Duplicate(format!("term '{}'", name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a term by id.
    pub fn term_by_id(&self, id: &TermId) -> Result<Option<Term>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let term = conn
            .query_row(
                "SELECT id, name, definition, source_url FROM terms WHERE id = ?1",
                params![id.as_str()],
                row_to_term,
            )
            .optional()?;
        Ok(term)
    }

    /// Fetch a term by its unique name.
    pub fn term_by_name(&self, name: &str) -> Result<Option<Term>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let term = conn
            .query_row(
                "SELECT id, name, definition, source_url FROM terms WHERE name = ?1",
                params![name],
                row_to_term,
            )
            .optional()?;
        Ok(term)
    }

    /// Existence probe without materializing the row.
    pub fn term_exists(&self, id: &TermId) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();
        let found: Option<bool> = conn
            .query_row(
                "SELECT 1 FROM terms WHERE id = ?1",
                params![id.as_str()],
                |_| Ok(true),
            )
            .optional()?;
        Ok(found.unwrap_or(false))
    }

    /// Substring search over names and definitions, ordered by name.
    ///
    /// An empty query matches nothing rather than everything.
    pub fn search_terms(&self, query: &str) -> Result<Vec<Term>, StoreError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", query);
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, definition, source_url FROM terms
             WHERE name LIKE ?1 OR definition LIKE ?1
             ORDER BY name",
        )?;
        let terms = stmt
            .query_map(params![&pattern], row_to_term)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(terms)
    }

    /// Every term, ordered by name.
    pub fn all_terms(&self) -> Result<Vec<Term>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, definition, source_url FROM terms ORDER BY name")?;
        let terms = stmt
            .query_map([], row_to_term)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(terms)
    }

    /// Replace the name, definition, and source of an existing term.
    ///
    /// The id must already exist; renaming onto a taken name is a
    /// [`StoreError::Duplicate`].
    pub fn update_term(&self, term: &Term) -> Result<Term, StoreError> {
        if term.id.is_empty() || term.name.is_empty() || term.definition.is_empty() {
            return Err(StoreError::InvalidData(
                "id, name, and definition are required".to_string(),
            ));
        }

        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE terms SET name = ?2, definition = ?3, source_url = ?4 WHERE id = ?1",
            params![
                term.id.as_str(),
                &term.name,
                &term.definition,
                term.source_url.as_deref(),
            ],
        );

        match updated {
            Ok(0) => Err(StoreError::NotFound(format!("term '{}'", term.id))),
            Ok(_) => Ok(term.clone()),
            Err(e) if is_constraint_violation(&e) => {
                Err(StoreError::Duplicate(format!("term '{}'", term.name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a term by id, reporting whether a row was removed.
    ///
    /// Any relationships referencing the term live in a different service
    /// and are untouched here; the gateway owns that cleanup.
    pub fn delete_term(&self, id: &TermId) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute("DELETE FROM terms WHERE id = ?1", params![id.as_str()])?;
        Ok(removed > 0)
    }

    /// Number of terms in the glossary.
    pub fn term_count(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM terms", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn row_to_term(row: &Row<'_>) -> rusqlite::Result<Term> {
    Ok(Term {
        id: TermId::new(row.get::<_, String>(0)?),
        name: row.get(1)?,
        definition: row.get(2)?,
        source_url: row.get(3)?,
    })
}

#[async_trait]
impl TermLookup for TermStore {
    async fn exists(&self, id: &TermId) -> CoreResult<bool> {
        Ok(self.term_exists(id)?)
    }

    async fn get_by_id(&self, id: &TermId) -> CoreResult<Option<Term>> {
        Ok(self.term_by_id(id)?)
    }

    async fn get_by_name(&self, name: &str) -> CoreResult<Option<Term>> {
        Ok(self.term_by_name(name)?)
    }

    async fn search(&self, query: &str) -> CoreResult<Vec<Term>> {
        Ok(self.search_terms(query)?)
    }
}
