//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Note operations require a
//! `tenant_id` parameter to enforce data isolation: a record belonging
//! to another tenant must be indistinguishable from a missing one.

use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    note::{CreateNote, Note, UpdateNote},
    tenant::{CreateTenant, Tenant},
    user::{CreateUser, User},
};

pub trait TenantRepository: Send + Sync {
    fn create(&self, input: CreateTenant) -> impl Future<Output = Result<Tenant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = Result<Tenant>> + Send;
    fn get_by_slug(&self, slug: &str) -> impl Future<Output = Result<Tenant>> + Send;
    /// Flip the tenant's plan to Pro and stamp `updated_at`. The only
    /// mutation a tenant supports after creation.
    fn upgrade_plan(&self, id: Uuid) -> impl Future<Output = Result<Tenant>> + Send;
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = Result<User>> + Send;
    /// Global lookup by id — identity resolution must re-fetch the
    /// current role regardless of what a token claims.
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = Result<User>> + Send;
    /// Global, case-sensitive exact-match lookup by email.
    fn get_by_email(&self, email: &str) -> impl Future<Output = Result<User>> + Send;
    fn list_by_tenant(&self, tenant_id: Uuid) -> impl Future<Output = Result<Vec<User>>> + Send;
}

pub trait NoteRepository: Send + Sync {
    fn create(&self, input: CreateNote) -> impl Future<Output = Result<Note>> + Send;
    fn get(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = Result<Note>> + Send;
    /// All notes of the tenant ordered newest-updated-first, optionally
    /// filtered to those whose title or content contains `search`
    /// case-insensitively.
    fn list(
        &self,
        tenant_id: Uuid,
        search: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Note>>> + Send;
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateNote,
    ) -> impl Future<Output = Result<Note>> + Send;
    /// Irreversible hard delete. `NotFound` if the note does not exist
    /// in this tenant.
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = Result<()>> + Send;
    /// Live note count for the tenant, used by the subscription policy
    /// at write time.
    fn count(&self, tenant_id: Uuid) -> impl Future<Output = Result<u64>> + Send;
}
