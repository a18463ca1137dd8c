//! Image host error types.

use thiserror::Error;

/// Image host upload errors.
///
/// Every variant ends the upload; nothing is retried.
#[derive(Debug, Error)]
pub enum HostingError {
    /// No response within the configured timeout.
    #[error("Upload timeout - ImgBB API did not respond in time")]
    Timeout,

    /// Connection, DNS or transport failure.
    #[error("Network error during upload: {0}")]
    Network(String),

    /// HTTP 200 with the failure flag set; carries the API's message.
    #[error("{0}")]
    Api(String),

    /// Any status other than 200.
    #[error("ImgBB API returned status code {0}")]
    UnexpectedStatus(u16),

    /// Body could not be interpreted.
    #[error("Unexpected error during upload: {0}")]
    InvalidResponse(String),

    /// HTTP client could not be built.
    #[error("image host configuration error: {0}")]
    Configuration(String),
}

impl HostingError {
    /// Create an API error from an optional message.
    #[must_use]
    pub fn api(message: Option<String>) -> Self {
        Self::Api(message.unwrap_or_else(|| "Unknown error".to_string()))
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

impl From<reqwest::Error> for HostingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            HostingError::Timeout.to_string(),
            "Upload timeout - ImgBB API did not respond in time"
        );
        assert_eq!(
            HostingError::UnexpectedStatus(502).to_string(),
            "ImgBB API returned status code 502"
        );
        assert_eq!(
            HostingError::Network("connection refused".into()).to_string(),
            "Network error during upload: connection refused"
        );
    }

    #[test]
    fn test_api_message_fallback() {
        assert_eq!(HostingError::api(None).to_string(), "Unknown error");
        assert_eq!(
            HostingError::api(Some("Invalid API v1 key.".into())).to_string(),
            "Invalid API v1 key."
        );
    }
}
