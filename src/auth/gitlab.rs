//! GitLab token lookup

use super::{AuthSource, token_from_cli, token_from_env};
use crate::error::{Error, Result};
use tracing::debug;

/// GitLab credentials
#[derive(Debug, Clone)]
pub struct GitLabAuthConfig {
    /// Personal access token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Find a GitLab token: `GITLAB_TOKEN`, `GL_TOKEN`, then glab's stored token
pub async fn get_gitlab_auth(host: Option<&str>) -> Result<GitLabAuthConfig> {
    if let Some(token) = token_from_env(&["GITLAB_TOKEN", "GL_TOKEN"]) {
        debug!("using GitLab token from environment");
        return Ok(GitLabAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    let host = host.unwrap_or("gitlab.com");
    if let Some(token) = token_from_cli("glab", &["config", "get", "token", "--host", host]).await {
        debug!("using GitLab token from glab CLI");
        return Ok(GitLabAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "no GitLab token found; set GITLAB_TOKEN or run `glab auth login`".to_string(),
    ))
}
