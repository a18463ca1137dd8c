//! Image repository for database operations.
//!
//! Implements upload record persistence using SeaORM. Each call checks a
//! connection out of the pool and returns it when the call ends, on success
//! and on error alike.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, Set,
};
use tracing::error;

use crate::entities::images;
use pixstash_core::upload::{
    DEFAULT_CONTENT_TYPE, NewUploadRecord, UploadError, UploadRecord,
    UploadRepository as UploadRepoTrait,
};
use pixstash_shared::ImageId;

/// Image repository implementation.
#[derive(Debug, Clone)]
pub struct ImageRepository {
    db: DatabaseConnection,
}

impl ImageRepository {
    /// Create a new image repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records for an identifier, newest first; later inserts win ties.
    fn by_id_newest_first(image_id: &ImageId) -> Select<images::Entity> {
        images::Entity::find()
            .filter(images::Column::Id.eq(image_id.as_str()))
            .order_by_desc(images::Column::UploadedAt)
            .order_by_desc(images::Column::RowId)
    }
}

impl UploadRepoTrait for ImageRepository {
    async fn insert(&self, input: NewUploadRecord) -> Result<UploadRecord, UploadError> {
        let active_model = images::ActiveModel {
            row_id: NotSet,
            id: Set(input.image_id.to_string()),
            s3_url: Set(input.remote_url),
            s3_key: Set(input.delete_token),
            original_filename: Set(Some(input.original_filename)),
            file_size: Set(Some(input.file_size)),
            content_type: Set(Some(input.content_type)),
            uploaded_at: Set(Utc::now()),
            metadata: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            error!(image_id = %input.image_id, error = %e, "Database error saving metadata");
            UploadError::repository(e.to_string())
        })?;

        to_domain(model)
    }

    async fn latest(&self, image_id: &ImageId) -> Result<Option<UploadRecord>, UploadError> {
        let model = Self::by_id_newest_first(image_id)
            .one(&self.db)
            .await
            .map_err(|e| UploadError::repository(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn all(&self, image_id: &ImageId) -> Result<Vec<UploadRecord>, UploadError> {
        let models = Self::by_id_newest_first(image_id)
            .all(&self.db)
            .await
            .map_err(|e| UploadError::repository(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn ping(&self) -> Result<(), UploadError> {
        self.db
            .ping()
            .await
            .map_err(|e| UploadError::repository(e.to_string()))
    }
}

/// Convert database model to domain model.
fn to_domain(model: images::Model) -> Result<UploadRecord, UploadError> {
    let image_id = ImageId::parse(&model.id)
        .map_err(|e| UploadError::repository(format!("stored row {}: {e}", model.row_id)))?;

    Ok(UploadRecord {
        image_id,
        remote_url: model.s3_url,
        delete_token: model.s3_key,
        original_filename: model.original_filename.unwrap_or_default(),
        file_size: model.file_size.unwrap_or_default(),
        content_type: model
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        uploaded_at: model.uploaded_at,
    })
}
