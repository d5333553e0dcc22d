//! Integration tests for the Note repository using in-memory
//! SurrealDB, with a focus on the tenant-isolation invariant.

use jotlet_core::models::note::{CreateNote, UpdateNote};
use jotlet_core::models::tenant::{CreateTenant, SubscriptionPlan};
use jotlet_core::models::user::{CreateUser, User, UserRole};
use jotlet_core::repository::{NoteRepository, TenantRepository, UserRepository};
use jotlet_db::repository::{
    SurrealNoteRepository, SurrealTenantRepository, SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Helper: in-memory DB with two tenants, one user each.
async fn setup() -> (Surreal<Db>, User, User) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    jotlet_db::run_migrations(&db).await.unwrap();

    let tenant_repo = SurrealTenantRepository::new(db.clone());
    let user_repo = SurrealUserRepository::new(db.clone());

    let mut users = Vec::new();
    for (name, slug, email) in [
        ("Acme Corporation", "acme", "admin@acme.test"),
        ("Globex Corporation", "globex", "admin@globex.test"),
    ] {
        let tenant = tenant_repo
            .create(CreateTenant {
                name: name.into(),
                slug: slug.into(),
                plan: SubscriptionPlan::Free,
            })
            .await
            .unwrap();
        let user = user_repo
            .create(CreateUser {
                tenant_id: tenant.id,
                email: email.into(),
                name: name.into(),
                password: "password".into(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();
        users.push(user);
    }

    let globex_user = users.pop().unwrap();
    let acme_user = users.pop().unwrap();
    (db, acme_user, globex_user)
}

fn new_note(user: &User, title: &str, content: &str) -> CreateNote {
    CreateNote {
        tenant_id: user.tenant_id,
        user_id: user.id,
        title: title.into(),
        content: content.into(),
    }
}

#[tokio::test]
async fn create_then_get_returns_identical_note() {
    let (db, acme, _) = setup().await;
    let repo = SurrealNoteRepository::new(db);

    let note = repo
        .create(new_note(&acme, "Standup", "Discuss roadmap"))
        .await
        .unwrap();
    assert_eq!(note.tenant_id, acme.tenant_id);
    assert_eq!(note.user_id, acme.id);

    let fetched = repo.get(acme.tenant_id, note.id).await.unwrap();
    assert_eq!(fetched.title, "Standup");
    assert_eq!(fetched.content, "Discuss roadmap");
}

#[tokio::test]
async fn cross_tenant_get_is_not_found() {
    let (db, acme, globex) = setup().await;
    let repo = SurrealNoteRepository::new(db);

    let note = repo
        .create(new_note(&acme, "Secret", "Acme internal"))
        .await
        .unwrap();

    // Explicitly supplying the foreign note id must not leak it.
    let result = repo.get(globex.tenant_id, note.id).await;
    assert!(result.is_err(), "note must be invisible across tenants");
}

#[tokio::test]
async fn cross_tenant_update_and_delete_are_not_found() {
    let (db, acme, globex) = setup().await;
    let repo = SurrealNoteRepository::new(db);

    let note = repo
        .create(new_note(&acme, "Secret", "Acme internal"))
        .await
        .unwrap();

    let update = repo
        .update(
            globex.tenant_id,
            note.id,
            UpdateNote {
                title: Some("Hijacked".into()),
                content: None,
            },
        )
        .await;
    assert!(update.is_err());

    let delete = repo.delete(globex.tenant_id, note.id).await;
    assert!(delete.is_err());

    // The note is untouched in its own tenant.
    let fetched = repo.get(acme.tenant_id, note.id).await.unwrap();
    assert_eq!(fetched.title, "Secret");
}

#[tokio::test]
async fn list_excludes_other_tenants_and_orders_newest_first() {
    let (db, acme, globex) = setup().await;
    let repo = SurrealNoteRepository::new(db);

    let first = repo.create(new_note(&acme, "First", "a")).await.unwrap();
    let _second = repo.create(new_note(&acme, "Second", "b")).await.unwrap();
    repo.create(new_note(&globex, "Foreign", "c"))
        .await
        .unwrap();

    // Touching the oldest note moves it to the front.
    repo.update(
        acme.tenant_id,
        first.id,
        UpdateNote {
            content: Some("a, revised".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let notes = repo.list(acme.tenant_id, None).await.unwrap();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.tenant_id == acme.tenant_id));
    assert_eq!(notes[0].title, "First");
    assert_eq!(notes[1].title, "Second");
}

#[tokio::test]
async fn search_matches_title_and_content_case_insensitively() {
    let (db, acme, _) = setup().await;
    let repo = SurrealNoteRepository::new(db);

    repo.create(new_note(&acme, "Roadmap Q3", "planning session"))
        .await
        .unwrap();
    repo.create(new_note(&acme, "Groceries", "milk and ROADMAP stickers"))
        .await
        .unwrap();
    repo.create(new_note(&acme, "Unrelated", "nothing here"))
        .await
        .unwrap();

    let hits = repo.list(acme.tenant_id, Some("roadmap")).await.unwrap();
    assert_eq!(hits.len(), 2);

    let none = repo.list(acme.tenant_id, Some("quarterly")).await.unwrap();
    assert!(none.is_empty(), "no match yields an empty list, not an error");
}

#[tokio::test]
async fn partial_update_leaves_other_field_unchanged() {
    let (db, acme, _) = setup().await;
    let repo = SurrealNoteRepository::new(db);

    let note = repo
        .create(new_note(&acme, "Title v1", "Original content"))
        .await
        .unwrap();

    let updated = repo
        .update(
            acme.tenant_id,
            note.id,
            UpdateNote {
                title: Some("Title v2".into()),
                content: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Title v2");
    assert_eq!(updated.content, "Original content");
    assert!(updated.updated_at >= note.updated_at);
}

#[tokio::test]
async fn delete_removes_note_and_second_delete_fails() {
    let (db, acme, _) = setup().await;
    let repo = SurrealNoteRepository::new(db);

    let note = repo
        .create(new_note(&acme, "Ephemeral", "gone soon"))
        .await
        .unwrap();

    repo.delete(acme.tenant_id, note.id).await.unwrap();
    assert!(repo.get(acme.tenant_id, note.id).await.is_err());
    assert!(repo.delete(acme.tenant_id, note.id).await.is_err());
}

#[tokio::test]
async fn count_is_tenant_scoped() {
    let (db, acme, globex) = setup().await;
    let repo = SurrealNoteRepository::new(db);

    assert_eq!(repo.count(acme.tenant_id).await.unwrap(), 0);

    for i in 0..3 {
        repo.create(new_note(&acme, &format!("Note {i}"), "x"))
            .await
            .unwrap();
    }
    repo.create(new_note(&globex, "Foreign", "y")).await.unwrap();

    assert_eq!(repo.count(acme.tenant_id).await.unwrap(), 3);
    assert_eq!(repo.count(globex.tenant_id).await.unwrap(), 1);
    assert_eq!(repo.count(Uuid::new_v4()).await.unwrap(), 0);
}
