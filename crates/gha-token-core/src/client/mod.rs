//! GitHub API client for the app and installation token endpoints.
//!
//! Every call is a single request: no retries, no pagination, no timeout
//! beyond the transport's defaults. Responses are decoded into the caller's
//! type and decode failures are reported as [`ApiError::Decode`].

mod dump;
mod installation;

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::{InstallationToken, JsonWebToken};
use crate::config::{TokenConfig, DEFAULT_GITHUB_API_URL};
use crate::error::ApiError;

pub use installation::{
    Installation, InstallationAccount, Repository, RepositoryListing, RepositoryOwner,
};

/// Media type requested on every call.
pub const GITHUB_ACCEPT_HEADER: &str = "application/vnd.github.machine-man-preview+json";

/// Configuration for GitHub API client behavior.
///
/// # Examples
///
/// ```
/// use gha_token_core::client::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_github_api_url("https://ghe.example.com/api/v3")
///     .with_verbose(true);
/// assert!(config.verbose);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string for API requests (required by GitHub)
    pub user_agent: String,
    /// GitHub API base URL
    pub github_api_url: String,
    /// Dump every request and response to the debug log
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("gha-token/{}", env!("CARGO_PKG_VERSION")),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            verbose: false,
        }
    }
}

impl ClientConfig {
    /// Derive the client settings from a token configuration.
    pub fn from_token_config(config: &TokenConfig) -> Self {
        Self::default()
            .with_github_api_url(config.api_base())
            .with_verbose(config.verbose)
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the GitHub API base URL.
    pub fn with_github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Enable or disable request/response dumps.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Credential placed in the `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub enum Authorization<'a> {
    /// App-level call, `Bearer <jwt>`.
    Bearer(&'a JsonWebToken),
    /// Installation-level call, `token <installation token>`.
    Token(&'a InstallationToken),
}

impl Authorization<'_> {
    /// Header value including the scheme.
    pub fn header_value(&self) -> String {
        match self {
            Self::Bearer(jwt) => format!("Bearer {}", jwt.token()),
            Self::Token(token) => format!("token {}", token.token()),
        }
    }
}

/// GitHub REST client issuing one JSON request per call.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl GitHubClient {
    /// Create a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client (TLS
    /// backend) cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder().build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build an absolute URL for an API path such as `/app/installations`.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.github_api_url,
            path.trim_start_matches('/')
        )
    }

    /// Issue exactly one request and decode the JSON response body into `T`.
    ///
    /// # Errors
    ///
    /// - `ApiError::InvalidUrl` if `url` cannot be parsed
    /// - `ApiError::Transport` if the request cannot be sent or the body read
    /// - `ApiError::HttpError` if GitHub answers with a non-success status
    /// - `ApiError::Decode` if the body is not the expected JSON shape
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        authorization: Authorization<'_>,
    ) -> Result<T, ApiError> {
        let parsed_url = reqwest::Url::parse(url).map_err(|e| ApiError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let request = self
            .http_client
            .request(method, parsed_url)
            .header(AUTHORIZATION, authorization.header_value())
            .header(ACCEPT, GITHUB_ACCEPT_HEADER)
            .header(USER_AGENT, self.config.user_agent.as_str())
            .build()?;

        if self.config.verbose {
            debug!("GitHub request:\n{}", dump::format_request(&request));
        }

        let response = self.http_client.execute(request).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.text().await?;

        if self.config.verbose {
            debug!(
                "GitHub response:\n{}",
                dump::format_response(status, version, &headers, &body)
            );
        }

        if !status.is_success() {
            return Err(ApiError::HttpError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Pull `message` out of a GitHub error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
