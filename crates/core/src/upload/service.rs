//! Upload service implementation.

use std::future::Future;
use std::sync::Arc;

use pixstash_shared::ImageId;
use tracing::{error, info, warn};

use super::error::UploadError;
use super::types::{IncomingFile, NewUploadRecord, UploadRecord};
use super::validation::{UploadLimits, sanitize_filename};
use crate::hosting::ImageHost;

/// Repository trait for upload record persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait UploadRepository: Send + Sync {
    /// Persist a record in one atomic write; the repository assigns the timestamp.
    fn insert(
        &self,
        record: NewUploadRecord,
    ) -> impl Future<Output = Result<UploadRecord, UploadError>> + Send;

    /// Most recent record for an identifier.
    fn latest(
        &self,
        image_id: &ImageId,
    ) -> impl Future<Output = Result<Option<UploadRecord>, UploadError>> + Send;

    /// All records for an identifier, newest first.
    fn all(
        &self,
        image_id: &ImageId,
    ) -> impl Future<Output = Result<Vec<UploadRecord>, UploadError>> + Send;

    /// Check the store is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), UploadError>> + Send;
}

/// Upload orchestration and lookups.
pub struct UploadService<H: ImageHost, R: UploadRepository> {
    host: Arc<H>,
    repo: Arc<R>,
    limits: UploadLimits,
}

impl<H: ImageHost, R: UploadRepository> UploadService<H, R> {
    /// Create a new upload service.
    #[must_use]
    pub fn new(host: Arc<H>, repo: Arc<R>, limits: UploadLimits) -> Self {
        Self { host, repo, limits }
    }

    /// The limits uploads are checked against.
    #[must_use]
    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    /// The image host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Validate a file, send it to the image host and record the result.
    ///
    /// Stops at the first failing step. A repository failure after a
    /// successful remote upload leaves the remote image without a local
    /// record; no compensating delete is attempted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The identifier is malformed
    /// - No file, or a file without a name, was sent
    /// - The extension is not allowed
    /// - The file exceeds the size limit
    /// - The image host fails
    /// - The repository write fails
    pub async fn upload(
        &self,
        raw_id: &str,
        file: Option<IncomingFile>,
    ) -> Result<UploadRecord, UploadError> {
        let image_id = ImageId::parse(raw_id).inspect_err(|_| {
            warn!(image_id = %raw_id, "Invalid image_id in upload");
        })?;

        let Some(file) = file else {
            warn!(image_id = %image_id, "No file in upload request");
            return Err(UploadError::MissingFile);
        };

        // A part without a filename is not a file upload.
        let Some(filename) = file.filename.as_deref() else {
            warn!(image_id = %image_id, "No file in upload request");
            return Err(UploadError::MissingFile);
        };
        if filename.is_empty() {
            warn!(image_id = %image_id, "Empty filename in upload");
            return Err(UploadError::EmptyFilename);
        }

        let original_filename = sanitize_filename(filename);
        if !self.limits.validate_extension(filename) || original_filename.is_empty() {
            warn!(image_id = %image_id, filename = %filename, "Invalid file type attempted");
            return Err(UploadError::InvalidFileType {
                allowed: self.limits.allowed_list(),
            });
        }

        let file_size = file.size();
        if !self.limits.validate_size(file_size) {
            warn!(image_id = %image_id, size = file_size, "File too large");
            return Err(UploadError::file_too_large(
                file_size,
                self.limits.max_file_size,
            ));
        }

        let content_type = file.content_type_or_default();

        let hosted = self
            .host
            .upload(&file.bytes, &original_filename, &image_id)
            .await?;

        let record = NewUploadRecord {
            image_id: image_id.clone(),
            remote_url: hosted.url,
            delete_token: hosted.delete_url.unwrap_or_default(),
            original_filename,
            file_size: i64::try_from(file_size).unwrap_or(i64::MAX),
            content_type,
        };

        let saved = self.repo.insert(record).await.inspect_err(|e| {
            error!(
                image_id = %image_id,
                error = %e,
                "Failed to save image metadata; remote image has no local record"
            );
        })?;

        info!(image_id = %image_id, url = %saved.remote_url, "Upload completed");
        Ok(saved)
    }

    /// Most recent upload for an identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed or the repository fails.
    pub async fn latest(&self, raw_id: &str) -> Result<Option<UploadRecord>, UploadError> {
        let image_id = ImageId::parse(raw_id)?;
        self.repo.latest(&image_id).await
    }

    /// Every upload for an identifier, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed or the repository fails.
    pub async fn history(&self, raw_id: &str) -> Result<Vec<UploadRecord>, UploadError> {
        let image_id = ImageId::parse(raw_id)?;
        self.repo.all(&image_id).await
    }

    /// Check the repository is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be reached.
    pub async fn ping(&self) -> Result<(), UploadError> {
        self.repo.ping().await
    }
}
