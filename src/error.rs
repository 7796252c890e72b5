//! Error types for the teacher search client.

use thiserror::Error;

/// Errors that can occur while performing a teacher search.
///
/// These cover the transport side only. Per-field validation problems are
/// reported through [`crate::validate::ValidationResult`] and block
/// submission before any request is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Network/HTTP request failed before a status line was read
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend answered with an error status (>= 400)
    #[error("Search failed with status {status}")]
    SearchFailed { status: u16 },

    /// The response body could not be read or decoded
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// The configured base URL could not be parsed
    #[error("Invalid base URL: {message}")]
    InvalidBaseUrl { message: String },
}

impl SearchError {
    /// Returns true if this error is potentially transient and the search
    /// is worth retrying with the same criteria.
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Network { .. } => true,
            SearchError::SearchFailed { status } => *status >= 500,
            SearchError::MalformedResponse { .. } => false,
            SearchError::InvalidBaseUrl { .. } => false,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Network {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for SearchError {
    fn from(err: url::ParseError) -> Self {
        SearchError::InvalidBaseUrl {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::MalformedResponse {
            message: err.to_string(),
        }
    }
}
