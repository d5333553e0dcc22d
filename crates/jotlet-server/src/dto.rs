//! Wire-format request and response bodies.
//!
//! The JSON surface uses camelCase keys; domain models stay
//! snake_case and are converted here.

use chrono::{DateTime, Utc};
use jotlet_auth::Principal;
use jotlet_core::models::note::NoteWithAuthor;
use jotlet_core::models::tenant::{SubscriptionPlan, Tenant};
use jotlet_core::models::user::UserRole;
use jotlet_policy::InvitedUser;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TenantBody {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub plan: SubscriptionPlan,
}

/// Authenticated user snapshot returned by login and `/api/auth/me`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub tenant: TenantBody,
}

impl From<&Principal> for UserBody {
    fn from(p: &Principal) -> Self {
        Self {
            id: p.user_id,
            email: p.email.clone(),
            name: p.name.clone(),
            role: p.role,
            tenant: TenantBody {
                id: p.tenant.id,
                name: p.tenant.name.clone(),
                slug: p.tenant.slug.clone(),
                plan: p.tenant.plan,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBody {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteBody {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: AuthorBody,
}

impl From<NoteWithAuthor> for NoteBody {
    fn from(n: NoteWithAuthor) -> Self {
        Self {
            id: n.note.id,
            title: n.note.title,
            content: n.note.content,
            created_at: n.note.created_at,
            updated_at: n.note.updated_at,
            author: AuthorBody {
                id: n.author.id,
                name: n.author.name,
                email: n.author.email,
                role: n.author.role,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteListBody {
    pub notes: Vec<NoteBody>,
}

/// Invite response, including the default password handed to the new
/// member out of band.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitedUserBody {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub default_password: String,
}

impl From<InvitedUser> for InvitedUserBody {
    fn from(u: InvitedUser) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            created_at: u.created_at,
            default_password: u.default_password,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpgradedTenantBody {
    pub tenant: TenantBody,
}

impl From<Tenant> for UpgradedTenantBody {
    fn from(t: Tenant) -> Self {
        Self {
            tenant: TenantBody {
                id: t.id,
                name: t.name,
                slug: t.slug,
                plan: t.plan,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsBody {
    pub max_notes: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct UsageBody {
    pub notes: u64,
}

#[derive(Debug, Serialize)]
pub struct StatusTenantBody {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionStatusBody {
    pub plan: SubscriptionPlan,
    pub limits: LimitsBody,
    pub usage: UsageBody,
    pub tenant: StatusTenantBody,
}

impl From<jotlet_policy::SubscriptionStatus> for SubscriptionStatusBody {
    fn from(s: jotlet_policy::SubscriptionStatus) -> Self {
        Self {
            plan: s.plan,
            limits: LimitsBody {
                max_notes: s.limits.max_notes,
            },
            usage: UsageBody {
                notes: s.usage.notes,
            },
            tenant: StatusTenantBody {
                name: s.tenant.name,
                slug: s.tenant.slug,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedBody {
    pub tenants_created: u32,
    pub users_created: u32,
}

/// Body of a 403 returned when the plan limit blocks a create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitExceededBody {
    pub error: String,
    pub current_count: u64,
    pub limit: u32,
}
