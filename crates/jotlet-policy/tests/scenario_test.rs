//! End-to-end scenario over the seeded demo data: free-tier Acme runs
//! into the note limit, pro-tier Globex does not, and upgrading Acme
//! lifts the cap.

use jotlet_core::error::Error;
use jotlet_core::models::tenant::Tenant;
use jotlet_core::models::user::User;
use jotlet_core::repository::{TenantRepository, UserRepository};
use jotlet_db::repository::{SurrealNoteRepository, SurrealTenantRepository, SurrealUserRepository};
use jotlet_db::seed::seed_demo_data;
use jotlet_policy::admin::AdminService;
use jotlet_policy::notes::NoteService;
use jotlet_policy::subscription::SubscriptionService;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

struct World {
    tenants: SurrealTenantRepository<Db>,
    users: SurrealUserRepository<Db>,
    notes: NoteService<SurrealNoteRepository<Db>, SurrealUserRepository<Db>>,
    subscription: SubscriptionService<SurrealTenantRepository<Db>, SurrealNoteRepository<Db>>,
    admin: AdminService<SurrealUserRepository<Db>, SurrealTenantRepository<Db>>,
}

async fn seeded_world() -> World {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    jotlet_db::run_migrations(&db).await.unwrap();
    seed_demo_data(&db).await.unwrap();

    World {
        tenants: SurrealTenantRepository::new(db.clone()),
        users: SurrealUserRepository::new(db.clone()),
        notes: NoteService::new(
            SurrealNoteRepository::new(db.clone()),
            SurrealUserRepository::new(db.clone()),
        ),
        subscription: SubscriptionService::new(
            SurrealTenantRepository::new(db.clone()),
            SurrealNoteRepository::new(db.clone()),
        ),
        admin: AdminService::new(
            SurrealUserRepository::new(db.clone()),
            SurrealTenantRepository::new(db),
        ),
    }
}

impl World {
    async fn tenant(&self, slug: &str) -> Tenant {
        self.tenants.get_by_slug(slug).await.unwrap()
    }

    async fn user(&self, email: &str) -> User {
        self.users.get_by_email(email).await.unwrap()
    }

    /// Create a note only if the subscription check allows it,
    /// mirroring the handler flow.
    async fn try_create(&self, tenant: &Tenant, author: &User, title: &str) -> Result<(), String> {
        let decision = self
            .subscription
            .check_create_note(tenant.id)
            .await
            .unwrap();
        if !decision.allowed {
            return Err(decision.reason.unwrap_or_default());
        }
        self.notes
            .create(tenant.id, author.id, title, "body")
            .await
            .unwrap();
        Ok(())
    }
}

#[tokio::test]
async fn free_tenant_hits_the_limit_and_pro_does_not() {
    let world = seeded_world().await;

    let acme = world.tenant("acme").await;
    let acme_admin = world.user("admin@acme.test").await;

    for i in 1..=3 {
        world
            .try_create(&acme, &acme_admin, &format!("Acme note {i}"))
            .await
            .unwrap();
    }

    // The fourth note is denied with the usage numbers attached.
    let denial = world
        .try_create(&acme, &acme_admin, "One too many")
        .await
        .unwrap_err();
    assert!(denial.contains("up to 3 notes"));

    let decision = world.subscription.check_create_note(acme.id).await.unwrap();
    assert!(!decision.allowed);
    assert_eq!(decision.current_count, Some(3));
    assert_eq!(decision.limit, Some(3));

    // Globex is on pro and keeps going well past three.
    let globex = world.tenant("globex").await;
    let globex_member = world.user("user@globex.test").await;
    for i in 1..=5 {
        world
            .try_create(&globex, &globex_member, &format!("Globex note {i}"))
            .await
            .unwrap();
    }
    assert_eq!(world.notes.list(globex.id, None).await.unwrap().len(), 5);

    // Acme still has exactly three and never saw Globex's notes.
    let acme_notes = world.notes.list(acme.id, None).await.unwrap();
    assert_eq!(acme_notes.len(), 3);
    assert!(acme_notes.iter().all(|n| n.note.tenant_id == acme.id));
}

#[tokio::test]
async fn upgrading_lifts_the_note_cap() {
    let world = seeded_world().await;

    let acme = world.tenant("acme").await;
    let acme_admin = world.user("admin@acme.test").await;

    for i in 1..=3 {
        world
            .try_create(&acme, &acme_admin, &format!("Note {i}"))
            .await
            .unwrap();
    }
    assert!(world.try_create(&acme, &acme_admin, "Blocked").await.is_err());

    let admin_tenant = world.tenant("acme").await;
    let principal =
        jotlet_auth::principal::Principal::from_parts(&acme_admin, &admin_tenant);
    world.admin.upgrade_tenant(&principal, "acme").await.unwrap();

    // Same tenant id, now unlimited.
    let acme = world.tenant("acme").await;
    world
        .try_create(&acme, &acme_admin, "Fourth note")
        .await
        .unwrap();
    assert_eq!(world.notes.list(acme.id, None).await.unwrap().len(), 4);
}

#[tokio::test]
async fn seeded_member_cannot_administer() {
    let world = seeded_world().await;

    let acme = world.tenant("acme").await;
    let member = world.user("user@acme.test").await;
    let principal = jotlet_auth::principal::Principal::from_parts(&member, &acme);

    let err = world
        .admin
        .upgrade_tenant(&principal, "acme")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AuthorizationDenied { .. }));
}
