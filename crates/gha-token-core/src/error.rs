//! Error types for GitHub App token operations.
//!
//! Errors are grouped by the stage that produces them: input validation, JWT
//! construction, GitHub API calls, and token resolution as a whole.

use std::path::PathBuf;

use thiserror::Error;

use crate::auth::GitHubAppId;
use crate::config::RepositorySelector;

/// Input validation errors.
///
/// These errors occur when validating user input or configuration data.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("Required field missing: {field}")]
    Required { field: String },

    /// A field has an invalid format.
    #[error("Invalid format for {field}: {message}")]
    InvalidFormat { field: String, message: String },
}

/// Errors raised while building the app JWT.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The private key file could not be read.
    #[error("Unable to read private key file {}: {source}", path.display())]
    KeyFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid private key format or data.
    #[error("Invalid private key: {message}")]
    InvalidPrivateKey { message: String },

    /// JWT signing failed.
    #[error("JWT generation failed: {message}")]
    JwtGenerationFailed { message: String },
}

/// Errors during GitHub API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client error (network, TLS, connection refused, etc.).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// GitHub answered with a non-success status.
    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    /// The response body did not have the expected JSON shape.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A URL built from configuration or returned by GitHub is not usable.
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl ApiError {
    /// HTTP status code of the failed response, if GitHub answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failure of a complete token resolution.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing the app JWT failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A GitHub API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// None of the app's installations can see the requested repository.
    #[error("repository {repository} not found in installations of app {app_id}")]
    RepositoryNotFound {
        repository: RepositorySelector,
        app_id: GitHubAppId,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
