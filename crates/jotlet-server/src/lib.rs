//! Jotlet HTTP server — REST API over the policy and storage layers.

use axum::Router;
use axum::routing::{get, post};
use surrealdb::Connection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;

/// Build the API router. Generic over the SurrealDB engine so the
/// same routes serve a remote database in production and the
/// embedded in-memory engine in development and tests.
pub fn router<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Auth
        .route("/api/auth/login", post(handlers::login::<C>))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/me", get(handlers::me::<C>))
        // Notes
        .route(
            "/api/notes",
            get(handlers::list_notes::<C>).post(handlers::create_note::<C>),
        )
        .route(
            "/api/notes/:id",
            get(handlers::get_note::<C>)
                .put(handlers::update_note::<C>)
                .delete(handlers::delete_note::<C>),
        )
        // Administration
        .route("/api/users/invite", post(handlers::invite_user::<C>))
        .route(
            "/api/tenants/:slug/upgrade",
            post(handlers::upgrade_tenant::<C>),
        )
        .route(
            "/api/subscription/status",
            get(handlers::subscription_status::<C>),
        )
        // Development
        .route("/api/seed", post(handlers::seed::<C>))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
