//! SurrealDB implementation of [`NoteRepository`].
//!
//! Every query is constrained by `tenant_id`; a note that exists in
//! another tenant is reported as `NotFound`, identical to a note that
//! does not exist at all.

use chrono::{DateTime, Utc};
use jotlet_core::error::Result;
use jotlet_core::models::note::{CreateNote, Note, UpdateNote};
use jotlet_core::repository::NoteRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct NoteRow {
    tenant_id: String,
    user_id: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NoteRow {
    fn into_note(self, id: Uuid) -> std::result::Result<Note, DbError> {
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Migration(format!("invalid tenant UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Migration(format!("invalid user UUID: {e}")))?;
        Ok(Note {
            id,
            tenant_id,
            user_id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct NoteRowWithId {
    record_id: String,
    tenant_id: String,
    user_id: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NoteRowWithId {
    fn try_into_note(self) -> std::result::Result<Note, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Migration(format!("invalid tenant UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Migration(format!("invalid user UUID: {e}")))?;
        Ok(Note {
            id,
            tenant_id,
            user_id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Note repository.
#[derive(Clone)]
pub struct SurrealNoteRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealNoteRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> NoteRepository for SurrealNoteRepository<C> {
    async fn create(&self, input: CreateNote) -> Result<Note> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('note', $id) SET \
                 tenant_id = $tenant_id, user_id = $user_id, \
                 title = $title, content = $content",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("title", input.title))
            .bind(("content", input.content))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<NoteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "note".into(),
            id: id_str,
        })?;

        Ok(row.into_note(id)?)
    }

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Note> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('note', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<NoteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "note".into(),
            id: id_str,
        })?;

        Ok(row.into_note(id)?)
    }

    async fn list(&self, tenant_id: Uuid, search: Option<&str>) -> Result<Vec<Note>> {
        let tenant_id_str = tenant_id.to_string();

        let mut builder = match search {
            Some(term) => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * FROM note \
                     WHERE tenant_id = $tenant_id \
                     AND (string::contains(string::lowercase(title), $term) \
                     OR string::contains(string::lowercase(content), $term)) \
                     ORDER BY updated_at DESC",
                )
                .bind(("term", term.to_lowercase())),
            None => self.db.query(
                "SELECT meta::id(id) AS record_id, * FROM note \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY updated_at DESC",
            ),
        };
        builder = builder.bind(("tenant_id", tenant_id_str));

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<NoteRowWithId> = result.take(0).map_err(DbError::from)?;

        let notes = rows
            .into_iter()
            .map(|row| row.try_into_note())
            .collect::<std::result::Result<Vec<_>, DbError>>()?;

        Ok(notes)
    }

    async fn update(&self, tenant_id: Uuid, id: Uuid, input: UpdateNote) -> Result<Note> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.content.is_some() {
            sets.push("content = $content");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('note', $id) SET {} \
             WHERE tenant_id = $tenant_id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()));

        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(content) = input.content {
            builder = builder.bind(("content", content));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<NoteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "note".into(),
            id: id_str,
        })?;

        Ok(row.into_note(id)?)
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        // RETURN BEFORE yields the deleted rows, so an empty result
        // distinguishes "nothing deleted" from success.
        let mut result = self
            .db
            .query(
                "DELETE type::record('note', $id) \
                 WHERE tenant_id = $tenant_id RETURN BEFORE",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<NoteRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "note".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn count(&self, tenant_id: Uuid) -> Result<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM note \
                 WHERE tenant_id = $tenant_id GROUP ALL",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
