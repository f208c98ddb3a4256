//! # gha-token core
//!
//! Issues authentication tokens for a GitHub App:
//! - the app JWT itself, signed RS256 with the app's private key
//! - an installation access token for a given installation ID
//! - an installation access token for whichever installation can see a
//!   given `owner/repo`
//!
//! # Examples
//!
//! ```rust,no_run
//! use gha_token_core::auth::{GitHubAppId, InstallationId};
//! use gha_token_core::config::{TokenConfig, TokenRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TokenConfig::new(GitHubAppId::new(123456), "app.private-key.pem")?
//!     .with_request(TokenRequest::Installation(InstallationId::new(789012)));
//!
//! let token = gha_token_core::issue_token(&config).await?;
//! if let Some(expires_at) = token.expires_at() {
//!     println!("expires at {}", expires_at);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resolver;

pub use error::{ApiError, AuthError, TokenError, ValidationError};

pub use auth::{
    GitHubAppId, InstallationId, InstallationToken, JsonWebToken, JwtClaims, JwtGenerator,
    PrivateKey, RS256JwtGenerator,
};
pub use config::{RepositorySelector, TokenConfig, TokenRequest, DEFAULT_GITHUB_API_URL};
pub use resolver::{issue_token, ResolvedToken, TokenResolver};
