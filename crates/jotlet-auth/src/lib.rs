//! Jotlet Auth — password hashing/verification, session token
//! issuance/validation, and identity resolution.

pub mod config;
pub mod error;
pub mod password;
pub mod principal;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use principal::{Principal, TenantSummary};
pub use service::{AuthService, LoginOutput};
pub use token::SessionClaims;
