//! Token resolution: turns a [`TokenRequest`] into a usable token.
//!
//! The app JWT is always signed first. Depending on the request it is either
//! returned as is, exchanged for a known installation's token, or used to
//! search the app's installations for one that can see a repository.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::auth::{
    GitHubAppId, InstallationToken, JsonWebToken, JwtGenerator, RS256JwtGenerator,
};
use crate::client::{ClientConfig, GitHubClient};
use crate::config::{RepositorySelector, TokenConfig, TokenRequest};
use crate::error::TokenError;

/// Result of a token resolution.
#[derive(Debug, Clone)]
pub enum ResolvedToken {
    /// The signed app JWT.
    App(JsonWebToken),
    /// An installation access token.
    Installation(InstallationToken),
}

impl ResolvedToken {
    /// The token string to hand to the caller.
    pub fn token(&self) -> &str {
        match self {
            Self::App(jwt) => jwt.token(),
            Self::Installation(token) => token.token(),
        }
    }

    /// When the token stops being accepted by GitHub, if known.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::App(jwt) => Some(jwt.expires_at()),
            Self::Installation(token) => token.expires_at(),
        }
    }
}

/// Resolves token requests for one GitHub App.
#[derive(Debug)]
pub struct TokenResolver<G: JwtGenerator> {
    app_id: GitHubAppId,
    jwt_generator: G,
    client: GitHubClient,
}

impl<G: JwtGenerator> TokenResolver<G> {
    /// Create a resolver for `app_id`.
    pub fn new(app_id: GitHubAppId, jwt_generator: G, client: GitHubClient) -> Self {
        Self {
            app_id,
            jwt_generator,
            client,
        }
    }

    /// The app this resolver signs for.
    pub fn app_id(&self) -> GitHubAppId {
        self.app_id
    }

    /// Produce the token described by `request`.
    ///
    /// # Errors
    ///
    /// - `TokenError::Auth` if the app JWT cannot be signed
    /// - `TokenError::Api` if any GitHub call fails
    /// - `TokenError::RepositoryNotFound` if no installation lists the repository
    pub async fn resolve(&self, request: &TokenRequest) -> Result<ResolvedToken, TokenError> {
        let jwt = self.jwt_generator.generate_jwt(self.app_id).await?;

        match request {
            TokenRequest::AppJwt => {
                info!(app_id = %self.app_id, "Generated JWT for app");
                Ok(ResolvedToken::App(jwt))
            }
            TokenRequest::Installation(installation_id) => {
                let token = self
                    .client
                    .create_installation_access_token(*installation_id, &jwt)
                    .await?;
                info!(
                    app_id = %self.app_id,
                    installation_id = %installation_id,
                    expires_at = ?token.expires_at(),
                    "Generated installation token"
                );
                Ok(ResolvedToken::Installation(token))
            }
            TokenRequest::Repository(repository) => {
                let token = self.token_for_repository(&jwt, repository).await?;
                info!(
                    app_id = %self.app_id,
                    repository = %repository,
                    expires_at = ?token.expires_at(),
                    "Generated installation token for repository"
                );
                Ok(ResolvedToken::Installation(token))
            }
        }
    }

    /// Walk the installations in listed order, minting a token for each and
    /// checking its repository listing. Stops at the first match.
    async fn token_for_repository(
        &self,
        jwt: &JsonWebToken,
        repository: &RepositorySelector,
    ) -> Result<InstallationToken, TokenError> {
        let installations = self.client.list_installations(jwt).await?;
        debug!(
            count = installations.len(),
            repository = %repository,
            "Searching installations for repository"
        );

        for installation in &installations {
            debug!(
                installation_id = %installation.id,
                account = installation.account.as_ref().map(|a| a.login.as_str()).unwrap_or("-"),
                "Probing installation"
            );

            let token = self
                .client
                .create_access_token_at(&installation.access_tokens_url, jwt)
                .await?;

            let listing = self
                .client
                .list_installation_repositories(&installation.repositories_url, &token)
                .await?;

            if listing.contains(repository) {
                debug!(installation_id = %installation.id, "Repository found");
                return Ok(token);
            }
        }

        Err(TokenError::RepositoryNotFound {
            repository: repository.clone(),
            app_id: self.app_id,
        })
    }
}

/// Load the key, sign, and resolve the configured request in one call.
///
/// # Errors
///
/// Same as [`TokenResolver::resolve`], plus `TokenError::Auth` when the key
/// file cannot be read or parsed and `TokenError::Api` when the HTTP client
/// cannot be built.
pub async fn issue_token(config: &TokenConfig) -> Result<ResolvedToken, TokenError> {
    let jwt_generator = RS256JwtGenerator::from_key_file(&config.key_path).await?;
    let client = GitHubClient::new(ClientConfig::from_token_config(config))?;

    TokenResolver::new(config.app_id, jwt_generator, client)
        .resolve(&config.request)
        .await
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
