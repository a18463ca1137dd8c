//! Common types used across the application.

pub mod image_id;

pub use image_id::{ImageId, ImageIdError};
