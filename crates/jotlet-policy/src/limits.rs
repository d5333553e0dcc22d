//! Plan limits table and pure policy predicates.

use jotlet_core::models::tenant::SubscriptionPlan;
use jotlet_core::models::user::UserRole;
use serde::Serialize;

/// Maximum number of notes on the free plan.
pub const FREE_MAX_NOTES: u32 = 3;

/// Feature limits attached to a subscription plan.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlanLimits {
    /// `None` means unlimited.
    pub max_notes: Option<u32>,
}

/// The static plan limits table.
pub fn limits_for(plan: SubscriptionPlan) -> PlanLimits {
    match plan {
        SubscriptionPlan::Free => PlanLimits {
            max_notes: Some(FREE_MAX_NOTES),
        },
        SubscriptionPlan::Pro => PlanLimits { max_notes: None },
    }
}

/// Whether a user with the given role may upgrade their tenant's plan.
pub fn can_upgrade(role: UserRole) -> bool {
    role == UserRole::Admin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_caps_notes_at_three() {
        assert_eq!(limits_for(SubscriptionPlan::Free).max_notes, Some(3));
    }

    #[test]
    fn pro_plan_is_unlimited() {
        assert_eq!(limits_for(SubscriptionPlan::Pro).max_notes, None);
    }

    #[test]
    fn only_admins_can_upgrade() {
        assert!(can_upgrade(UserRole::Admin));
        assert!(!can_upgrade(UserRole::Member));
    }
}
