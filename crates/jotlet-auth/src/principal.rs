//! The resolved, authenticated identity making a request.

use jotlet_core::Error;
use jotlet_core::models::tenant::{SubscriptionPlan, Tenant};
use jotlet_core::models::user::{User, UserRole};
use serde::Serialize;
use uuid::Uuid;

/// Tenant context carried on every principal.
#[derive(Debug, Clone, Serialize)]
pub struct TenantSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub plan: SubscriptionPlan,
}

impl From<&Tenant> for TenantSummary {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name.clone(),
            slug: tenant.slug.clone(),
            plan: tenant.plan,
        }
    }
}

/// The authenticated principal: user identity plus current tenant
/// context. Role and plan are always re-derived from the store at
/// resolution time, never trusted from token claims.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub tenant: TenantSummary,
}

impl Principal {
    pub fn from_parts(user: &User, tenant: &Tenant) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            tenant: TenantSummary::from(tenant),
        }
    }

    /// Centralized role check used by every privileged operation.
    pub fn require_role(&self, role: UserRole) -> Result<(), Error> {
        if self.role == role {
            Ok(())
        } else {
            Err(Error::AuthorizationDenied {
                reason: format!("requires {} role", role.as_str()),
            })
        }
    }
}
