//! Validation for link input

use thiserror::Error;
use url::Url;

/// Rejected link input. Raised before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a URL")]
    EmptyUrl,
    #[error("Invalid URL '{input}': {reason}. Please enter a valid URL starting with http:// or https://")]
    InvalidUrl { input: String, reason: String },
}

/// Check that `input` is an absolute URL with an explicit scheme.
///
/// Returns the parsed URL; callers store the trimmed input text, not the
/// parser's canonical form.
pub fn validate_url(input: &str) -> Result<Url, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    Url::parse(trimmed).map_err(|e| ValidationError::InvalidUrl {
        input: trimmed.to_string(),
        reason: e.to_string(),
    })
}
