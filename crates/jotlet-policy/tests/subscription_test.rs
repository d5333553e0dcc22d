//! Subscription policy tests against in-memory SurrealDB.

use jotlet_core::error::Error;
use jotlet_core::models::note::CreateNote;
use jotlet_core::models::tenant::{CreateTenant, SubscriptionPlan, Tenant};
use jotlet_core::models::user::{CreateUser, User, UserRole};
use jotlet_core::repository::{NoteRepository, TenantRepository, UserRepository};
use jotlet_db::repository::{
    SurrealNoteRepository, SurrealTenantRepository, SurrealUserRepository,
};
use jotlet_policy::SubscriptionService;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type TestSubscriptionService =
    SubscriptionService<SurrealTenantRepository<Db>, SurrealNoteRepository<Db>>;

async fn setup(plan: SubscriptionPlan) -> (Surreal<Db>, Tenant, User, TestSubscriptionService) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    jotlet_db::run_migrations(&db).await.unwrap();

    let tenant = SurrealTenantRepository::new(db.clone())
        .create(CreateTenant {
            name: "Acme Corporation".into(),
            slug: "acme".into(),
            plan,
        })
        .await
        .unwrap();
    let user = SurrealUserRepository::new(db.clone())
        .create(CreateUser {
            tenant_id: tenant.id,
            email: "admin@acme.test".into(),
            name: "Acme Admin".into(),
            password: "password".into(),
            role: UserRole::Admin,
        })
        .await
        .unwrap();

    let service = SubscriptionService::new(
        SurrealTenantRepository::new(db.clone()),
        SurrealNoteRepository::new(db.clone()),
    );
    (db, tenant, user, service)
}

async fn add_notes(db: &Surreal<Db>, tenant: &Tenant, user: &User, count: usize) {
    let repo = SurrealNoteRepository::new(db.clone());
    for i in 0..count {
        repo.create(CreateNote {
            tenant_id: tenant.id,
            user_id: user.id,
            title: format!("Note {i}"),
            content: "content".into(),
        })
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn free_tenant_below_limit_is_allowed() {
    let (db, tenant, user, service) = setup(SubscriptionPlan::Free).await;
    add_notes(&db, &tenant, &user, 2).await;

    let decision = service.check_create_note(tenant.id).await.unwrap();
    assert!(decision.allowed);
    assert_eq!(decision.current_count, Some(2));
    assert_eq!(decision.limit, Some(3));
}

#[tokio::test]
async fn free_tenant_at_limit_is_denied_with_usage_numbers() {
    let (db, tenant, user, service) = setup(SubscriptionPlan::Free).await;
    add_notes(&db, &tenant, &user, 3).await;

    let decision = service.check_create_note(tenant.id).await.unwrap();
    assert!(!decision.allowed);
    assert_eq!(decision.current_count, Some(3));
    assert_eq!(decision.limit, Some(3));
    let reason = decision.reason.unwrap();
    assert!(reason.contains("up to 3 notes"));
    assert!(reason.contains("Upgrade to Pro"));
}

#[tokio::test]
async fn pro_tenant_is_always_allowed() {
    let (db, tenant, user, service) = setup(SubscriptionPlan::Pro).await;
    add_notes(&db, &tenant, &user, 10).await;

    let decision = service.check_create_note(tenant.id).await.unwrap();
    assert!(decision.allowed);
    // Pro skips the count entirely.
    assert_eq!(decision.current_count, None);
    assert_eq!(decision.limit, None);
}

#[tokio::test]
async fn unknown_tenant_is_not_found() {
    let (_db, _tenant, _user, service) = setup(SubscriptionPlan::Free).await;

    let err = service.check_create_note(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn status_reports_plan_limits_and_usage() {
    let (db, tenant, user, service) = setup(SubscriptionPlan::Free).await;
    add_notes(&db, &tenant, &user, 2).await;

    let status = service.status(tenant.id).await.unwrap();
    assert_eq!(status.plan, SubscriptionPlan::Free);
    assert_eq!(status.limits.max_notes, Some(3));
    assert_eq!(status.usage.notes, 2);
    assert_eq!(status.tenant.name, "Acme Corporation");
    assert_eq!(status.tenant.slug, "acme");
}
