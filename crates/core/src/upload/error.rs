//! Upload error types.

use pixstash_shared::{AppError, ImageIdError};
use thiserror::Error;

use crate::hosting::HostingError;

const MIB: u64 = 1024 * 1024;

/// Whole mebibytes, rounded to nearest.
fn megabytes(bytes: u64) -> u64 {
    bytes.saturating_add(MIB / 2) / MIB
}

/// Upload and lookup errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Identifier failed validation.
    #[error("Invalid image ID format")]
    InvalidId(#[from] ImageIdError),

    /// No `file` part in the request.
    #[error("No file provided")]
    MissingFile,

    /// File part without a filename.
    #[error("No file selected")]
    EmptyFilename,

    /// Extension outside the allow-set.
    #[error("Invalid file type. Allowed types: {allowed}")]
    InvalidFileType {
        /// Comma-separated allowed extensions.
        allowed: String,
    },

    /// File exceeds the configured maximum.
    #[error("File too large. Maximum size: {}MB", megabytes(*.max))]
    FileTooLarge {
        /// Actual file size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Remote host rejected or failed the upload.
    #[error(transparent)]
    Hosting(#[from] HostingError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl UploadError {
    /// Create a file too large error.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidId(_)
            | UploadError::MissingFile
            | UploadError::EmptyFilename
            | UploadError::InvalidFileType { .. } => Self::Validation(err.to_string()),
            UploadError::FileTooLarge { .. } => Self::PayloadTooLarge(err.to_string()),
            UploadError::Hosting(e) => Self::ExternalService(e.to_string()),
            UploadError::Repository(msg) => Self::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            UploadError::InvalidId(ImageIdError("a b".into())).to_string(),
            "Invalid image ID format"
        );
        assert_eq!(UploadError::MissingFile.to_string(), "No file provided");
        assert_eq!(UploadError::EmptyFilename.to_string(), "No file selected");
        assert_eq!(
            UploadError::InvalidFileType {
                allowed: "gif, png".into()
            }
            .to_string(),
            "Invalid file type. Allowed types: gif, png"
        );
    }

    #[test]
    fn test_too_large_message_in_megabytes() {
        assert_eq!(
            UploadError::file_too_large(40 * MIB, 32 * MIB).to_string(),
            "File too large. Maximum size: 32MB"
        );
        assert_eq!(
            UploadError::file_too_large(2048, 1024).to_string(),
            "File too large. Maximum size: 0MB"
        );
    }

    #[test]
    fn test_megabytes_rounds_to_nearest() {
        assert_eq!(megabytes(0), 0);
        assert_eq!(megabytes(MIB / 2 - 1), 0);
        assert_eq!(megabytes(MIB + MIB / 2), 2);
        assert_eq!(megabytes(u64::MAX), u64::MAX / MIB);
    }

    #[test]
    fn test_app_error_mapping() {
        assert_eq!(AppError::from(UploadError::MissingFile).status_code(), 400);
        assert_eq!(
            AppError::from(UploadError::file_too_large(2, 1)).status_code(),
            413
        );
        assert_eq!(
            AppError::from(UploadError::Hosting(HostingError::Timeout)).status_code(),
            500
        );
        let db = AppError::from(UploadError::repository("disk I/O error"));
        assert!(matches!(db, AppError::Database(ref m) if m == "disk I/O error"));
    }
}
