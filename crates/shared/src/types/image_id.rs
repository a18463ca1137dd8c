//! Caller-supplied image identifier.
//!
//! An identifier groups one or more uploads. It is opaque to the service but
//! restricted to alphanumerics, `-` and `_` so it is safe in URLs and logs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid image id: {0:?}")]
pub struct ImageIdError(pub String);

/// Validated image identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageId(String);

impl ImageId {
    /// Parses and validates an identifier.
    ///
    /// # Errors
    ///
    /// Returns `ImageIdError` if `raw` is empty or contains anything other
    /// than alphanumerics, `-` and `_`.
    pub fn parse(raw: &str) -> Result<Self, ImageIdError> {
        if Self::is_valid(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ImageIdError(raw.to_string()))
        }
    }

    /// Returns true if `raw` is an acceptable identifier.
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        !raw.is_empty()
            && raw
                .chars()
                .filter(|c| *c != '-' && *c != '_')
                .all(char::is_alphanumeric)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ImageId {
    type Err = ImageIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ImageId {
    type Error = ImageIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(ImageIdError(value))
        }
    }
}

impl From<ImageId> for String {
    fn from(id: ImageId) -> Self {
        id.0
    }
}

impl AsRef<str> for ImageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
