//! Tenant-scoped note operations with input validation.
//!
//! The tenant id always comes from the authenticated principal, never
//! from client input, so a request cannot inject itself into another
//! tenant. This service does not check subscription limits — that is
//! the caller's responsibility before `create`, which keeps the two
//! policies composable.

use std::collections::HashMap;

use jotlet_core::error::{Error, Result};
use jotlet_core::models::note::{CreateNote, MAX_TITLE_LEN, Note, NoteWithAuthor, UpdateNote};
use jotlet_core::models::user::AuthorSummary;
use jotlet_core::repository::{NoteRepository, UserRepository};
use uuid::Uuid;

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Validation {
            message: "Title is required".into(),
        });
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::Validation {
            message: format!("Title too long (max {MAX_TITLE_LEN} characters)"),
        });
    }
    Ok(title.to_string())
}

fn validate_content(content: &str) -> Result<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(Error::Validation {
            message: "Content is required".into(),
        });
    }
    Ok(content.to_string())
}

/// Note service over tenant-scoped storage.
pub struct NoteService<N: NoteRepository, U: UserRepository> {
    note_repo: N,
    user_repo: U,
}

impl<N: NoteRepository, U: UserRepository> NoteService<N, U> {
    pub fn new(note_repo: N, user_repo: U) -> Self {
        Self {
            note_repo,
            user_repo,
        }
    }

    async fn with_author(&self, note: Note) -> Result<NoteWithAuthor> {
        let author = self.user_repo.get_by_id(note.user_id).await?;
        Ok(NoteWithAuthor {
            author: AuthorSummary::from(&author),
            note,
        })
    }

    /// All notes of the tenant, newest-updated-first, each joined with
    /// its author projection. `search` filters case-insensitively on
    /// title or content; no match yields an empty list.
    pub async fn list(&self, tenant_id: Uuid, search: Option<&str>) -> Result<Vec<NoteWithAuthor>> {
        let notes = self.note_repo.list(tenant_id, search).await?;

        let authors: HashMap<Uuid, AuthorSummary> = self
            .user_repo
            .list_by_tenant(tenant_id)
            .await?
            .iter()
            .map(|u| (u.id, AuthorSummary::from(u)))
            .collect();

        notes
            .into_iter()
            .map(|note| {
                let author = authors.get(&note.user_id).cloned().ok_or_else(|| {
                    Error::Internal(format!("note {} has no author in tenant", note.id))
                })?;
                Ok(NoteWithAuthor { note, author })
            })
            .collect()
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<NoteWithAuthor> {
        let note = self.note_repo.get(tenant_id, id).await?;
        self.with_author(note).await
    }

    /// Create a note for the authenticated author. Title and content
    /// are trimmed, then validated (title 1–200 chars, content
    /// non-empty). Subscription limits must already have been checked
    /// by the caller.
    pub async fn create(
        &self,
        tenant_id: Uuid,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<NoteWithAuthor> {
        let note = self
            .note_repo
            .create(CreateNote {
                tenant_id,
                user_id: author_id,
                title: validate_title(title)?,
                content: validate_content(content)?,
            })
            .await?;
        self.with_author(note).await
    }

    /// Partial update; at least one field must be supplied, and any
    /// supplied field is re-validated with the same rules as `create`.
    pub async fn update(&self, tenant_id: Uuid, id: Uuid, input: UpdateNote) -> Result<NoteWithAuthor> {
        if input.is_empty() {
            return Err(Error::Validation {
                message: "At least one of title or content is required".into(),
            });
        }

        let patch = UpdateNote {
            title: input.title.as_deref().map(validate_title).transpose()?,
            content: input.content.as_deref().map(validate_content).transpose()?,
        };

        let note = self.note_repo.update(tenant_id, id, patch).await?;
        self.with_author(note).await
    }

    /// Irreversible hard delete, tenant-checked.
    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<()> {
        self.note_repo.delete(tenant_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed_and_required() {
        assert_eq!(validate_title("  Standup  ").unwrap(), "Standup");
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn title_length_is_capped_post_trim() {
        let max = "x".repeat(200);
        assert_eq!(validate_title(&max).unwrap(), max);
        assert!(validate_title(&"x".repeat(201)).is_err());
        // Surrounding whitespace does not count against the limit.
        assert_eq!(validate_title(&format!("  {max}  ")).unwrap(), max);
    }

    #[test]
    fn content_is_trimmed_and_required() {
        assert_eq!(validate_content(" body ").unwrap(), "body");
        assert!(validate_content(" \n\t ").is_err());
    }
}
