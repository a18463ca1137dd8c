//! Shared types, errors, and configuration for Pixstash.
//!
//! This crate provides common types used across all other crates:
//! - The validated image identifier
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
pub use types::{ImageId, ImageIdError};
