//! Image host configuration types.

use std::time::Duration;

use pixstash_shared::config::ImgbbConfig;

/// Image host client configuration.
#[derive(Debug, Clone)]
pub struct HostingConfig {
    /// Upload endpoint URL.
    pub api_url: String,
    /// API key sent with every upload.
    pub api_key: String,
    /// Timeout for a single upload request.
    pub timeout: Duration,
}

impl HostingConfig {
    /// Default ImgBB upload endpoint.
    pub const DEFAULT_API_URL: &'static str = "https://api.imgbb.com/1/upload";
    /// Default request timeout: 30 seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a config for the default endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the upload endpoint.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is present.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl From<&ImgbbConfig> for HostingConfig {
    fn from(config: &ImgbbConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_api_url(config.api_url.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }
}
