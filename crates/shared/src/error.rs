//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// The message of client-facing variants (`Validation`, `PayloadTooLarge`,
/// `NotFound`, `ExternalService`, `Unavailable`) is echoed to the caller.
/// `Database` carries server-side detail only.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed identifier or unacceptable file.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upload exceeds the configured maximum size.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Remote image host error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// A dependency required for serving is unavailable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::PayloadTooLarge(_) => 413,
            Self::Unavailable(_) => 503,
            Self::Database(_) | Self::ExternalService(_) => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Unavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Whether the message may be shown to the caller verbatim.
    #[must_use]
    pub const fn is_client_visible(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::PayloadTooLarge(_)
                | Self::NotFound(_)
                | Self::ExternalService(_)
                | Self::Unavailable(_)
        )
    }

    /// The bare message, without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::PayloadTooLarge(msg)
            | Self::NotFound(msg)
            | Self::Database(msg)
            | Self::ExternalService(msg)
            | Self::Unavailable(msg) => msg,
        }
    }
}
