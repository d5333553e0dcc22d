//! Subscription policy — plan limit checks and usage snapshots.
//!
//! Limit checks are re-evaluated against live counts at write time;
//! the plan embedded in a session token is never consulted. The
//! check-then-create sequence is deliberately not atomic: two
//! concurrent creates at the boundary can both pass, which is an
//! accepted, benign race for this domain.

use jotlet_core::error::Result;
use jotlet_core::models::tenant::SubscriptionPlan;
use jotlet_core::repository::{NoteRepository, TenantRepository};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::limits::{PlanLimits, limits_for};

/// Outcome of a limit check, with usage numbers for client display
/// when the action is denied.
#[derive(Debug, Clone, Serialize)]
pub struct LimitDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl LimitDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            current_count: None,
            limit: None,
        }
    }
}

/// Tenant identification attached to a status snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct StatusTenant {
    pub name: String,
    pub slug: String,
}

/// Read-only subscription snapshot for display.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionStatus {
    pub plan: SubscriptionPlan,
    pub limits: PlanLimits,
    pub usage: Usage,
    pub tenant: StatusTenant,
}

#[derive(Debug, Clone, Serialize)]
pub struct Usage {
    pub notes: u64,
}

/// Subscription policy service.
pub struct SubscriptionService<T: TenantRepository, N: NoteRepository> {
    tenant_repo: T,
    note_repo: N,
}

impl<T: TenantRepository, N: NoteRepository> SubscriptionService<T, N> {
    pub fn new(tenant_repo: T, note_repo: N) -> Self {
        Self {
            tenant_repo,
            note_repo,
        }
    }

    /// Decide whether the tenant may create another note.
    ///
    /// Pro tenants are always allowed. Free tenants are allowed while
    /// their live note count is below the plan limit; a denial carries
    /// the count and limit for user-facing messaging.
    pub async fn check_create_note(&self, tenant_id: Uuid) -> Result<LimitDecision> {
        let tenant = self.tenant_repo.get_by_id(tenant_id).await?;
        let limits = limits_for(tenant.plan);

        let Some(max_notes) = limits.max_notes else {
            return Ok(LimitDecision::allow());
        };

        let current = self.note_repo.count(tenant_id).await?;
        if current >= max_notes as u64 {
            debug!(
                %tenant_id,
                current,
                limit = max_notes,
                "note creation denied by plan limit"
            );
            return Ok(LimitDecision {
                allowed: false,
                reason: Some(format!(
                    "Free plan limit reached. You can create up to {max_notes} notes. \
                     Upgrade to Pro for unlimited notes."
                )),
                current_count: Some(current),
                limit: Some(max_notes),
            });
        }

        Ok(LimitDecision {
            allowed: true,
            reason: None,
            current_count: Some(current),
            limit: Some(max_notes),
        })
    }

    /// Read-only plan/usage snapshot for the tenant.
    pub async fn status(&self, tenant_id: Uuid) -> Result<SubscriptionStatus> {
        let tenant = self.tenant_repo.get_by_id(tenant_id).await?;
        let notes = self.note_repo.count(tenant_id).await?;

        Ok(SubscriptionStatus {
            plan: tenant.plan,
            limits: limits_for(tenant.plan),
            usage: Usage { notes },
            tenant: StatusTenant {
                name: tenant.name,
                slug: tenant.slug,
            },
        })
    }
}
