//! Remote image hosting.
//!
//! Uploads go to the ImgBB API as a single form POST carrying the API key,
//! the base64-encoded image and a display name. There are no retries; the
//! configured timeout bounds each call.
//!
//! # Response handling
//!
//! ```text
//! HTTP 200 + success=true   -> HostedImage { url, delete_url }
//! HTTP 200 + success=false  -> HostingError::Api(error.message)
//! any other status          -> HostingError::UnexpectedStatus(code)
//! timeout                   -> HostingError::Timeout
//! connect / DNS / transport -> HostingError::Network
//! ```

mod client;
mod config;
mod error;

pub use client::{HostedImage, ImageHost, ImgbbClient};
pub use config::HostingConfig;
pub use error::HostingError;
