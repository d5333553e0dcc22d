//! Note domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::AuthorSummary;

/// Maximum allowed note title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// A text note. Notes are tenant-scoped first, author-scoped second:
/// a note is visible and mutable only through requests whose resolved
/// tenant matches `tenant_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Author of the note. Required, but any member of the tenant may
    /// update or delete the note, not just the author.
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A note joined with its author projection, as returned by all read
/// paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteWithAuthor {
    #[serde(flatten)]
    pub note: Note,
    pub author: AuthorSummary,
}

/// Fields required to create a new note. `tenant_id` and `user_id`
/// always come from the authenticated principal, never from client
/// input.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateNote {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
