//! # gha-token CLI
//!
//! Command-line interface printing a GitHub App token to standard output:
//! - the app JWT (no `--installId` / `--repo`)
//! - an installation token for `--installId`
//! - an installation token for the installation that can see `--repo owner/repo`
//!
//! Standard output carries only the token, without a trailing newline. All
//! diagnostics go to standard error.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use gha_token_core::{
    issue_token, GitHubAppId, InstallationId, RepositorySelector, ResolvedToken, TokenConfig,
    TokenError, TokenRequest, DEFAULT_GITHUB_API_URL,
};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use url::Url;

// ============================================================================
// CLI Structure
// ============================================================================

/// gha-token - GitHub App JWT and installation token generator
#[derive(Parser, Debug)]
#[command(name = "gha-token")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate a GitHub App JWT or installation access token")]
#[command(
    long_about = "Signs a GitHub App JWT with the app's private key and optionally exchanges it \
                  for an installation access token, selected by installation ID or by repository"
)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// GitHub API URL
    #[arg(
        short = 'g',
        long = "apiUrl",
        env = "GHA_TOKEN_API_URL",
        default_value = DEFAULT_GITHUB_API_URL
    )]
    pub api_url: Url,

    /// Application ID as defined in app settings
    #[arg(short = 'a', long = "appId", env = "GHA_TOKEN_APP_ID")]
    pub app_id: GitHubAppId,

    /// Path to key PEM file generated in app settings
    #[arg(short = 'k', long = "keyPath", env = "GHA_TOKEN_KEY_PATH")]
    pub key_path: PathBuf,

    /// Installation ID of the application
    #[arg(short = 'i', long = "installId", env = "GHA_TOKEN_INSTALL_ID")]
    pub install_id: Option<InstallationId>,

    /// {owner/repo} of the GitHub repository
    #[arg(
        short = 'r',
        long = "repo",
        env = "GHA_TOKEN_REPO",
        value_name = "OWNER/REPO"
    )]
    pub repo: Option<RepositorySelector>,

    /// Verbose stderr, including full HTTP request/response dumps
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Build the immutable token configuration from the parsed arguments.
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            api_url: self.api_url.clone(),
            app_id: self.app_id,
            key_path: self.key_path.clone(),
            request: TokenRequest::from_selectors(self.install_id, self.repo.clone()),
            verbose: self.verbose,
        }
    }
}

// ============================================================================
// CLI Error Types
// ============================================================================

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Token(#[from] TokenError),

    #[error("Logging initialization failed: {message}")]
    Logging { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// Argument errors never reach here: clap exits with status 2 itself.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Logging { .. } => 1,
            Self::Token(TokenError::Auth(_)) => 3,
            Self::Token(TokenError::Api(_)) => 4,
            Self::Token(TokenError::RepositoryNotFound { .. }) => 5,
            Self::Io(_) => 6,
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Main CLI entry point
pub async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let token = generate_token(&cli).await?;
    write_token(&mut std::io::stdout().lock(), &token)?;

    Ok(())
}

/// Resolve the token the arguments ask for.
pub async fn generate_token(cli: &Cli) -> Result<ResolvedToken, CliError> {
    let config = cli.token_config();
    Ok(issue_token(&config).await?)
}

/// Write the token with no trailing newline.
pub fn write_token(out: &mut impl Write, token: &ResolvedToken) -> Result<(), CliError> {
    out.write_all(token.token().as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Raised by `--verbose`. The HTTP dumps are logged by the core crate.
const VERBOSE_DIRECTIVE: &str = "gha_token_core=debug";

/// Build the log filter from `RUST_LOG` (default: warnings only).
///
/// `--verbose` layers its directive on top of whatever `RUST_LOG` says, so the
/// HTTP dumps are written even under `RUST_LOG=warn` or `off`.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    match VERBOSE_DIRECTIVE.parse::<Directive>() {
        Ok(directive) if verbose => filter.add_directive(directive),
        _ => filter,
    }
}

/// Initialize logging to standard error based on CLI arguments
fn initialize_logging(cli: &Cli) -> Result<(), CliError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
            cli.verbose,
        ))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    let result = if cli.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| CliError::Logging {
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
