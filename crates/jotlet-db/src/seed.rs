//! Demo seed data: two tenants (Acme on free, Globex on pro), each
//! with one admin and one member, all sharing the password
//! `"password"`. Intended for development and demos only.

use jotlet_core::error::{Error, Result};
use jotlet_core::models::tenant::{CreateTenant, SubscriptionPlan, Tenant};
use jotlet_core::models::user::{CreateUser, UserRole};
use jotlet_core::repository::{TenantRepository, UserRepository};
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::repository::{SurrealTenantRepository, SurrealUserRepository};

/// Password assigned to every seeded account.
pub const SEED_PASSWORD: &str = "password";

/// Counts of records ensured by a seed run.
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub tenants_created: u32,
    pub users_created: u32,
}

async fn ensure_tenant<C: Connection>(
    repo: &SurrealTenantRepository<C>,
    name: &str,
    slug: &str,
    plan: SubscriptionPlan,
    summary: &mut SeedSummary,
) -> Result<Tenant> {
    match repo.get_by_slug(slug).await {
        Ok(tenant) => Ok(tenant),
        Err(Error::NotFound { .. }) => {
            let tenant = repo
                .create(CreateTenant {
                    name: name.into(),
                    slug: slug.into(),
                    plan,
                })
                .await?;
            summary.tenants_created += 1;
            Ok(tenant)
        }
        Err(e) => Err(e),
    }
}

async fn ensure_user<C: Connection>(
    repo: &SurrealUserRepository<C>,
    tenant: &Tenant,
    email: &str,
    name: &str,
    role: UserRole,
    summary: &mut SeedSummary,
) -> Result<()> {
    match repo.get_by_email(email).await {
        Ok(_) => Ok(()),
        Err(Error::NotFound { .. }) => {
            repo.create(CreateUser {
                tenant_id: tenant.id,
                email: email.into(),
                name: name.into(),
                password: SEED_PASSWORD.into(),
                role,
            })
            .await?;
            summary.users_created += 1;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Seed the demo tenants and users. Idempotent: records that already
/// exist are left untouched.
pub async fn seed_demo_data<C: Connection>(db: &Surreal<C>) -> Result<SeedSummary> {
    let tenant_repo = SurrealTenantRepository::new(db.clone());
    let user_repo = SurrealUserRepository::new(db.clone());
    let mut summary = SeedSummary::default();

    let acme = ensure_tenant(
        &tenant_repo,
        "Acme Corporation",
        "acme",
        SubscriptionPlan::Free,
        &mut summary,
    )
    .await?;
    let globex = ensure_tenant(
        &tenant_repo,
        "Globex Corporation",
        "globex",
        SubscriptionPlan::Pro,
        &mut summary,
    )
    .await?;

    let users = [
        (&acme, "admin@acme.test", "Acme Admin", UserRole::Admin),
        (&acme, "user@acme.test", "Acme User", UserRole::Member),
        (&globex, "admin@globex.test", "Globex Admin", UserRole::Admin),
        (&globex, "user@globex.test", "Globex User", UserRole::Member),
    ];
    for (tenant, email, name, role) in users {
        ensure_user(&user_repo, tenant, email, name, role, &mut summary).await?;
    }

    info!(
        tenants_created = summary.tenants_created,
        users_created = summary.users_created,
        "Demo data seeded"
    );

    Ok(summary)
}
