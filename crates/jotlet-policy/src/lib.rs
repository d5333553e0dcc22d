//! Jotlet Policy — the decision layer between authenticated requests
//! and storage: subscription limit enforcement, tenant-scoped note
//! operations with validation, and admin-only tenant administration.

pub mod admin;
pub mod limits;
pub mod notes;
pub mod subscription;

pub use admin::{AdminService, InviteInput, InvitedUser};
pub use limits::{PlanLimits, can_upgrade, limits_for};
pub use notes::NoteService;
pub use subscription::{LimitDecision, SubscriptionService, SubscriptionStatus};
