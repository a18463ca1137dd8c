//! File checks evaluated before any network call.

use std::collections::BTreeSet;

use pixstash_shared::config::UploadConfig;

/// Extension allow-set and size ceiling for uploads.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    /// Maximum file size in bytes, inclusive.
    pub max_file_size: u64,
    /// Allowed extensions, lowercase, without the dot.
    pub allowed_extensions: BTreeSet<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for UploadLimits {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            allowed_extensions: config.allowed_extensions.clone(),
        }
    }
}

impl UploadLimits {
    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// True iff `filename` has a dot and its lowercased suffix is allowed.
    #[must_use]
    pub fn validate_extension(&self, filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .is_some_and(|(_, ext)| self.allowed_extensions.contains(&ext.to_lowercase()))
    }

    /// True iff `size` does not exceed the maximum.
    #[must_use]
    pub fn validate_size(&self, size: u64) -> bool {
        size <= self.max_file_size
    }

    /// Allowed extensions as a sorted, comma-separated list.
    #[must_use]
    pub fn allowed_list(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Reduce a client-supplied filename to a safe form.
///
/// Path separators and whitespace become `_`; anything other than ASCII
/// alphanumerics, `.`, `-` and `_` is dropped; leading and trailing `.`/`_`
/// are trimmed. May return an empty string.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}
