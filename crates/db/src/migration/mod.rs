//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. Applied migrations are
//! tracked, so running them on every start is safe.

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_images;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260101_000001_images::Migration)]
    }
}
