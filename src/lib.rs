use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::DbPool;

pub mod config;
pub mod domain;
pub mod forms;
pub mod models;
pub mod printer;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod sync;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Bring the database schema up to date.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        log::info!("Applied {} migration(s)", applied.len());
    }
    Ok(())
}
