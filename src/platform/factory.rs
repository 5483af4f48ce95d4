//! Platform service construction

use crate::auth::{get_github_auth, get_gitlab_auth};
use crate::error::Result;
use crate::platform::{GitHubService, GitLabService, PlatformService};
use crate::types::{Platform, PlatformConfig};
use tracing::debug;

/// Create a platform service for `config`, authenticating when a token is
/// available
///
/// Missing credentials are not an error: public repositories resolve
/// anonymously.
pub async fn create_platform_service(config: &PlatformConfig) -> Result<Box<dyn PlatformService>> {
    let host = config.host.clone();
    match config.platform {
        Platform::GitHub => {
            let token = match get_github_auth(host.as_deref()).await {
                Ok(auth) => Some(auth.token),
                Err(e) => {
                    debug!(error = %e, "no GitHub token, using anonymous access");
                    None
                }
            };
            let service = GitHubService::new(
                token.as_deref(),
                config.owner.clone(),
                config.repo.clone(),
                host,
            )?;
            Ok(Box::new(service))
        }
        Platform::GitLab => {
            let token = match get_gitlab_auth(host.as_deref()).await {
                Ok(auth) => Some(auth.token),
                Err(e) => {
                    debug!(error = %e, "no GitLab token, using anonymous access");
                    None
                }
            };
            let service =
                GitLabService::new(token, config.owner.clone(), config.repo.clone(), host)?;
            Ok(Box::new(service))
        }
    }
}
