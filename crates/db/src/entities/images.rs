//! `SeaORM` Entity for images table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub row_id: i64,
    pub id: String,
    pub s3_url: String,
    pub s3_key: String,
    pub original_filename: Option<String>,
    pub file_size: Option<i64>,
    pub content_type: Option<String>,
    pub uploaded_at: DateTimeUtc,
    /// Reserved; never written or read by the service.
    pub metadata: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
