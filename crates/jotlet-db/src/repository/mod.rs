//! SurrealDB repository implementations.

mod note;
mod tenant;
mod user;

pub use note::SurrealNoteRepository;
pub use tenant::SurrealTenantRepository;
pub use user::SurrealUserRepository;
