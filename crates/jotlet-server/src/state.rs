//! Shared application state.

use std::sync::Arc;

use jotlet_auth::{AuthConfig, AuthService};
use jotlet_db::repository::{SurrealNoteRepository, SurrealTenantRepository, SurrealUserRepository};
use jotlet_policy::{AdminService, NoteService, SubscriptionService};
use surrealdb::{Connection, Surreal};

type Users<C> = SurrealUserRepository<C>;
type Tenants<C> = SurrealTenantRepository<C>;
type Notes<C> = SurrealNoteRepository<C>;

/// Service container handed to every handler. Generic over the
/// SurrealDB engine so tests can run against the in-memory backend.
pub struct AppState<C: Connection> {
    pub auth: Arc<AuthService<Users<C>, Tenants<C>>>,
    pub notes: Arc<NoteService<Notes<C>, Users<C>>>,
    pub subscription: Arc<SubscriptionService<Tenants<C>, Notes<C>>>,
    pub admin: Arc<AdminService<Users<C>, Tenants<C>>>,
    pub db: Surreal<C>,
    pub cookie_secure: bool,
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, auth_config: AuthConfig, cookie_secure: bool) -> Self {
        let users = || match &auth_config.pepper {
            Some(p) => SurrealUserRepository::with_pepper(db.clone(), p.clone()),
            None => SurrealUserRepository::new(db.clone()),
        };
        let tenants = || SurrealTenantRepository::new(db.clone());
        let notes = || SurrealNoteRepository::new(db.clone());

        Self {
            auth: Arc::new(AuthService::new(users(), tenants(), auth_config.clone())),
            notes: Arc::new(NoteService::new(notes(), users())),
            subscription: Arc::new(SubscriptionService::new(tenants(), notes())),
            admin: Arc::new(AdminService::new(users(), tenants())),
            db,
            cookie_secure,
        }
    }
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            notes: self.notes.clone(),
            subscription: self.subscription.clone(),
            admin: self.admin.clone(),
            db: self.db.clone(),
            cookie_secure: self.cookie_secure,
        }
    }
}
