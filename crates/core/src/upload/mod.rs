//! Image upload orchestration.
//!
//! This module provides business logic for uploads including:
//! - Identifier, extension and size validation
//! - Delegating storage to the remote image host
//! - Recording the identifier to URL mapping
//! - Latest-record and history lookups

mod error;
mod service;
mod types;
mod validation;

pub use error::UploadError;
pub use service::{UploadRepository, UploadService};
pub use types::{DEFAULT_CONTENT_TYPE, IncomingFile, NewUploadRecord, UploadRecord};
pub use validation::{UploadLimits, sanitize_filename};
