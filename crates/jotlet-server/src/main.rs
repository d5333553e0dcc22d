//! Jotlet server entry point.

use jotlet_db::DbManager;
use jotlet_server::config::{DbBackend, ServerConfig};
use jotlet_server::{AppState, router};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("jotlet=info".parse()?),
        )
        .json()
        .init();

    let config = ServerConfig::from_env();

    let app = match &config.db {
        DbBackend::Memory => {
            tracing::info!("Using embedded in-memory database");
            let db = Surreal::new::<Mem>(()).await?;
            db.use_ns("jotlet").use_db("main").await?;
            jotlet_db::run_migrations(&db).await?;
            router(AppState::new(db, config.auth.clone(), config.cookie_secure))
        }
        DbBackend::Remote(db_config) => {
            let manager = DbManager::connect(db_config).await?;
            let db = manager.client().clone();
            jotlet_db::run_migrations(&db).await?;
            router(AppState::new(db, config.auth.clone(), config.cookie_secure))
        }
    };

    tracing::info!("Jotlet API listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
