//! Identity resolution service — credential login and token-based
//! resolution.

use jotlet_core::error::{Error, Result};
use jotlet_core::repository::{TenantRepository, UserRepository};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::principal::Principal;
use crate::token;

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    pub principal: Principal,
    /// Signed session token (set as a cookie by the HTTP layer).
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Identity resolution service.
///
/// Generic over repository implementations so that the auth layer has
/// no dependency on the database crate.
pub struct AuthService<U: UserRepository, T: TenantRepository> {
    user_repo: U,
    tenant_repo: T,
    config: AuthConfig,
}

impl<U: UserRepository, T: TenantRepository> AuthService<U, T> {
    pub fn new(user_repo: U, tenant_repo: T, config: AuthConfig) -> Self {
        Self {
            user_repo,
            tenant_repo,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate with email + password.
    ///
    /// Unknown email and wrong password both collapse into the same
    /// "invalid credentials" rejection so that callers cannot probe
    /// which accounts exist. The underlying cause is logged at debug
    /// level only.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Principal> {
        let user = match self.user_repo.get_by_email(email).await {
            Ok(user) => user,
            Err(Error::NotFound { .. }) => {
                debug!(email, "login rejected: unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            debug!(email, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tenant = self.tenant_repo.get_by_id(user.tenant_id).await?;
        Ok(Principal::from_parts(&user, &tenant))
    }

    /// Authenticate and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutput> {
        let principal = self.authenticate(email, password).await?;
        let token = token::issue_session_token(&principal, &self.config)?;
        Ok(LoginOutput {
            principal,
            token,
            expires_in: self.config.token_lifetime_secs,
        })
    }

    /// Resolve the principal behind a session token.
    ///
    /// The token is trusted only as proof of identity: after signature
    /// and expiry validation, the user and tenant are re-fetched from
    /// the store so the returned role and plan are current, not the
    /// snapshot baked into the token. A valid token whose user no
    /// longer exists yields `NotFound`, distinct from an invalid
    /// token.
    pub async fn resolve_token(&self, token: &str) -> Result<Principal> {
        let claims = token::decode_session_token(token, &self.config)?;
        let user_id = claims.user_id()?;

        let user = self.user_repo.get_by_id(user_id).await?;
        let tenant = self.tenant_repo.get_by_id(user.tenant_id).await?;
        Ok(Principal::from_parts(&user, &tenant))
    }
}
