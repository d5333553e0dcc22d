//! Tenant administration — admin-only operations: inviting members
//! and upgrading the subscription plan.

use chrono::{DateTime, Utc};
use jotlet_auth::principal::Principal;
use jotlet_core::error::{Error, Result};
use jotlet_core::models::tenant::{SubscriptionPlan, Tenant};
use jotlet_core::models::user::{CreateUser, UserRole};
use jotlet_core::repository::{TenantRepository, UserRepository};
use serde::Serialize;
use tracing::info;

use crate::limits::can_upgrade;

/// Default password assigned to invited accounts, returned in the
/// invite response for out-of-band distribution. A known weak pattern
/// suitable only for a development/demo posture.
pub const DEFAULT_INVITE_PASSWORD: &str = "password";

const MAX_NAME_LEN: usize = 100;

/// Validated invitation input.
#[derive(Debug, Clone)]
pub struct InviteInput {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// Summary of a freshly invited account. Excludes the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct InvitedUser {
    pub id: uuid::Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    /// The fixed default password the new member logs in with.
    pub default_password: String,
}

fn validate_invite(input: &InviteInput) -> Result<(String, String)> {
    let email = input.email.trim();
    let (local, domain) = email.split_once('@').ok_or_else(|| Error::Validation {
        message: "Invalid email format".into(),
    })?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(Error::Validation {
            message: "Invalid email format".into(),
        });
    }

    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Name is required".into(),
        });
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::Validation {
            message: format!("Name too long (max {MAX_NAME_LEN} characters)"),
        });
    }

    Ok((email.to_string(), name.to_string()))
}

/// Tenant administration service.
pub struct AdminService<U: UserRepository, T: TenantRepository> {
    user_repo: U,
    tenant_repo: T,
}

impl<U: UserRepository, T: TenantRepository> AdminService<U, T> {
    pub fn new(user_repo: U, tenant_repo: T) -> Self {
        Self {
            user_repo,
            tenant_repo,
        }
    }

    /// Invite a new member into the acting admin's tenant.
    ///
    /// Email uniqueness is global: an address registered under any
    /// tenant conflicts. The new account receives the fixed default
    /// password and the caller-specified role.
    pub async fn invite(&self, principal: &Principal, input: InviteInput) -> Result<InvitedUser> {
        principal.require_role(UserRole::Admin)?;
        let (email, name) = validate_invite(&input)?;

        match self.user_repo.get_by_email(&email).await {
            Ok(_) => {
                return Err(Error::AlreadyExists {
                    entity: format!("user with email {email}"),
                });
            }
            Err(Error::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let user = self
            .user_repo
            .create(CreateUser {
                tenant_id: principal.tenant.id,
                email,
                name,
                password: DEFAULT_INVITE_PASSWORD.into(),
                role: input.role,
            })
            .await?;

        info!(
            invited = %user.email,
            tenant = %principal.tenant.slug,
            by = %principal.email,
            role = user.role.as_str(),
            "user invited"
        );

        Ok(InvitedUser {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
            default_password: DEFAULT_INVITE_PASSWORD.into(),
        })
    }

    /// Upgrade the tenant identified by `slug` to the Pro plan.
    ///
    /// The slug must resolve to the acting admin's own tenant; any
    /// other tenant's slug yields `NotFound`, indistinguishable from a
    /// slug that does not exist. Upgrading an already-Pro tenant is a
    /// validation error. Pro is terminal: there is no downgrade.
    pub async fn upgrade_tenant(&self, principal: &Principal, slug: &str) -> Result<Tenant> {
        if !can_upgrade(principal.role) {
            return Err(Error::AuthorizationDenied {
                reason: "only admins can upgrade tenant subscriptions".into(),
            });
        }

        let tenant = self.tenant_repo.get_by_slug(slug).await?;
        if tenant.id != principal.tenant.id {
            // Uniform not-found: do not reveal that the slug exists.
            return Err(Error::NotFound {
                entity: "tenant".into(),
                id: format!("slug={slug}"),
            });
        }

        if tenant.plan == SubscriptionPlan::Pro {
            return Err(Error::Validation {
                message: "Tenant is already on the Pro plan".into(),
            });
        }

        let upgraded = self.tenant_repo.upgrade_plan(tenant.id).await?;

        info!(
            tenant = %upgraded.slug,
            by = %principal.email,
            "tenant upgraded to Pro"
        );

        Ok(upgraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(email: &str, name: &str) -> InviteInput {
        InviteInput {
            email: email.into(),
            name: name.into(),
            role: UserRole::Member,
        }
    }

    #[test]
    fn invite_email_must_have_local_domain_and_dot() {
        assert!(validate_invite(&input("user@acme.test", "User")).is_ok());
        assert!(validate_invite(&input("not-an-email", "User")).is_err());
        assert!(validate_invite(&input("@acme.test", "User")).is_err());
        assert!(validate_invite(&input("user@", "User")).is_err());
        assert!(validate_invite(&input("user@acme", "User")).is_err());
    }

    #[test]
    fn invite_name_is_trimmed_and_bounded() {
        let (_, name) = validate_invite(&input("u@acme.test", "  Ada  ")).unwrap();
        assert_eq!(name, "Ada");
        assert!(validate_invite(&input("u@acme.test", "   ")).is_err());
        assert!(validate_invite(&input("u@acme.test", &"x".repeat(101))).is_err());
    }
}
