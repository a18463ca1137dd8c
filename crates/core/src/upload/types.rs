//! Upload types and data structures.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use pixstash_shared::ImageId;

/// Content type recorded when the client does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file part as received from the client.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Filename from the part headers, if any.
    pub filename: Option<String>,
    /// Content type from the part headers, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Bytes,
}

impl IncomingFile {
    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// The declared content type, or the generic binary type.
    #[must_use]
    pub fn content_type_or_default(&self) -> String {
        self.content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string()
    }
}

/// Input for recording a successful upload.
///
/// The timestamp is assigned by the repository at insertion.
#[derive(Debug, Clone)]
pub struct NewUploadRecord {
    /// Identifier the upload is filed under.
    pub image_id: ImageId,
    /// URL returned by the image host.
    pub remote_url: String,
    /// Deletion URL from the image host; empty when none was returned.
    pub delete_token: String,
    /// Sanitized original filename.
    pub original_filename: String,
    /// Size in bytes.
    pub file_size: i64,
    /// MIME type.
    pub content_type: String,
}

/// One persisted upload. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    /// Identifier the upload is filed under. Not unique.
    pub image_id: ImageId,
    /// URL returned by the image host.
    pub remote_url: String,
    /// Deletion URL from the image host; empty when none was returned.
    pub delete_token: String,
    /// Sanitized original filename.
    pub original_filename: String,
    /// Size in bytes.
    pub file_size: i64,
    /// MIME type.
    pub content_type: String,
    /// Insertion time.
    pub uploaded_at: DateTime<Utc>,
}

impl UploadRecord {
    /// The deletion URL, if the host returned one.
    #[must_use]
    pub fn delete_url(&self) -> Option<&str> {
        Some(self.delete_token.as_str()).filter(|t| !t.is_empty())
    }
}
