//! Images table for upload records.
//!
//! `id` is the caller's identifier and is not unique; `row_id` is the
//! surrogate key and breaks ties between equal timestamps.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(IMAGES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS images;")
            .await?;
        Ok(())
    }
}

const IMAGES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS images (
    row_id INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL,
    s3_url TEXT NOT NULL,
    s3_key TEXT NOT NULL,
    original_filename TEXT,
    file_size INTEGER,
    content_type TEXT,
    uploaded_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    metadata TEXT
);

-- Recent uploads first
CREATE INDEX IF NOT EXISTS idx_uploaded_at ON images(uploaded_at DESC);

-- Lookup by identifier (latest / history)
CREATE INDEX IF NOT EXISTS idx_images_id ON images(id, uploaded_at DESC);
";
