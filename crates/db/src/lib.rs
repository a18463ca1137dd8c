//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository implementations of the core traits
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::ImageRepository;

use std::time::Duration;

use pixstash_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migration::Migrator;

/// Establishes a connection pool for the configured store.
///
/// In-memory stores are limited to one pooled connection.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let in_memory = config.path == ":memory:";
    let mut options = ConnectOptions::new(config.url());
    options
        .max_connections(if in_memory { 1 } else { config.max_connections.max(1) })
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// Creates the schema if absent. Safe to run on every start.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("Database initialized successfully");
    Ok(())
}
