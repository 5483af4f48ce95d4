//! GitHub token lookup

use super::{AuthSource, token_from_cli, token_from_env};
use crate::error::{Error, Result};
use tracing::debug;

/// GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Personal access or OAuth token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Find a GitHub token: `GITHUB_TOKEN`, `GH_TOKEN`, then `gh auth token`
pub async fn get_github_auth(host: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(token) = token_from_env(&["GITHUB_TOKEN", "GH_TOKEN"]) {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    let mut args = vec!["auth", "token"];
    if let Some(host) = host {
        args.extend(["--hostname", host]);
    }
    if let Some(token) = token_from_cli("gh", &args).await {
        debug!("using GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "no GitHub token found; set GITHUB_TOKEN or run `gh auth login`".to_string(),
    ))
}
