//! Token request configuration.
//!
//! A [`TokenConfig`] is built once from user input and never modified. Which
//! token is produced is decided by its [`TokenRequest`].

use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;
use url::Url;

use crate::auth::{GitHubAppId, InstallationId};
use crate::error::ValidationError;

/// Public GitHub REST API endpoint.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// An `owner/name` repository reference.
///
/// # Examples
///
/// ```
/// use gha_token_core::config::RepositorySelector;
///
/// let repo: RepositorySelector = "octo/hello-world".parse().unwrap();
/// assert_eq!(repo.owner(), "octo");
/// assert_eq!(repo.name(), "hello-world");
/// assert!("invalid-format".parse::<RepositorySelector>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositorySelector {
    owner: String,
    name: String,
}

impl RepositorySelector {
    /// Create a selector from its parts. Both must be non-empty and free of `/`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let owner = owner.into();
        let name = name.into();

        if owner.is_empty() || name.is_empty() || owner.contains('/') || name.contains('/') {
            return Err(ValidationError::InvalidFormat {
                field: "repo".to_string(),
                message: format!("must be owner/repo but was: {}/{}", owner, name),
            });
        }

        Ok(Self { owner, name })
    }

    /// Account login owning the repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without the owner.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-sensitive comparison against a repository as listed by GitHub.
    pub fn matches(&self, owner_login: &str, name: &str) -> bool {
        self.owner == owner_login && self.name == name
    }
}

impl std::fmt::Display for RepositorySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositorySelector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "repo".to_string(),
            message: format!("value must be owner/repo but was: {}", s),
        };

        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(*owner, *name)?)
            }
            _ => Err(invalid()),
        }
    }
}

/// Which token a run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRequest {
    /// The signed app JWT itself. No API calls.
    AppJwt,
    /// An access token for a known installation.
    Installation(InstallationId),
    /// An access token for whichever installation can see the repository.
    Repository(RepositorySelector),
}

impl TokenRequest {
    /// Select the flow from the optional selectors.
    ///
    /// An installation ID wins over a repository selector.
    pub fn from_selectors(
        installation_id: Option<InstallationId>,
        repository: Option<RepositorySelector>,
    ) -> Self {
        match (installation_id, repository) {
            (Some(installation_id), Some(repository)) => {
                warn!(
                    installation_id = %installation_id,
                    repository = %repository,
                    "Both installation ID and repository supplied; using the installation ID"
                );
                Self::Installation(installation_id)
            }
            (Some(installation_id), None) => Self::Installation(installation_id),
            (None, Some(repository)) => Self::Repository(repository),
            (None, None) => Self::AppJwt,
        }
    }
}

/// Immutable settings for one token issuance.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// GitHub REST API base URL
    pub api_url: Url,
    /// GitHub App ID (JWT issuer)
    pub app_id: GitHubAppId,
    /// Path to the app's PEM private key
    pub key_path: PathBuf,
    /// Which token to produce
    pub request: TokenRequest,
    /// Dump HTTP requests and responses to the log
    pub verbose: bool,
}

impl TokenConfig {
    /// Create a configuration for the app JWT flow against the public API.
    pub fn new(app_id: GitHubAppId, key_path: impl Into<PathBuf>) -> Result<Self, ValidationError> {
        let api_url = Url::parse(DEFAULT_GITHUB_API_URL).map_err(|e| {
            ValidationError::InvalidFormat {
                field: "api_url".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            api_url,
            app_id,
            key_path: key_path.into(),
            request: TokenRequest::AppJwt,
            verbose: false,
        })
    }

    /// Set the API base URL.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    /// Set which token to produce.
    pub fn with_request(mut self, request: TokenRequest) -> Self {
        self.request = request;
        self
    }

    /// Enable or disable HTTP dumps.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// API base URL without a trailing slash, ready for path concatenation.
    pub fn api_base(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
