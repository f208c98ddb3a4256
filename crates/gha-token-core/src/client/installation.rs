//! App installation endpoints and the response shapes they return.

use reqwest::Method;
use serde::Deserialize;

use crate::auth::{InstallationId, InstallationToken, JsonWebToken};
use crate::client::{Authorization, GitHubClient};
use crate::config::RepositorySelector;
use crate::error::ApiError;

/// One entry of `GET /app/installations`.
#[derive(Debug, Clone, Deserialize)]
pub struct Installation {
    pub id: InstallationId,
    pub access_tokens_url: String,
    pub repositories_url: String,
    #[serde(default)]
    pub account: Option<InstallationAccount>,
}

/// Account an installation belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallationAccount {
    pub login: String,
}

/// One page of `GET /installation/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryListing {
    #[serde(default)]
    pub total_count: Option<u64>,
    pub repositories: Vec<Repository>,
}

impl RepositoryListing {
    /// Whether the listing contains the selected repository (exact match).
    pub fn contains(&self, selector: &RepositorySelector) -> bool {
        self.repositories
            .iter()
            .any(|repo| selector.matches(&repo.owner.login, &repo.name))
    }
}

/// Repository as listed for an installation.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: RepositoryOwner,
}

/// Owner of a listed repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

impl GitHubClient {
    /// List the app's installations (first page only).
    ///
    /// `GET {api}/app/installations` authenticated with the app JWT.
    pub async fn list_installations(
        &self,
        jwt: &JsonWebToken,
    ) -> Result<Vec<Installation>, ApiError> {
        let url = self.api_url("/app/installations");
        self.request_json(Method::GET, &url, Authorization::Bearer(jwt))
            .await
    }

    /// Mint an access token for an installation.
    ///
    /// `POST {api}/app/installations/{id}/access_tokens` authenticated with
    /// the app JWT.
    pub async fn create_installation_access_token(
        &self,
        installation_id: InstallationId,
        jwt: &JsonWebToken,
    ) -> Result<InstallationToken, ApiError> {
        let url = self.api_url(&format!(
            "/app/installations/{}/access_tokens",
            installation_id
        ));
        self.create_access_token_at(&url, jwt).await
    }

    /// Mint an access token through an installation's `access_tokens_url`.
    pub async fn create_access_token_at(
        &self,
        access_tokens_url: &str,
        jwt: &JsonWebToken,
    ) -> Result<InstallationToken, ApiError> {
        self.request_json(Method::POST, access_tokens_url, Authorization::Bearer(jwt))
            .await
    }

    /// Fetch the first page of an installation's `repositories_url`,
    /// authenticated with that installation's token.
    pub async fn list_installation_repositories(
        &self,
        repositories_url: &str,
        token: &InstallationToken,
    ) -> Result<RepositoryListing, ApiError> {
        self.request_json(Method::GET, repositories_url, Authorization::Token(token))
            .await
    }
}

#[cfg(test)]
#[path = "installation_tests.rs"]
mod tests;
