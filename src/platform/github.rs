//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Platform, PlatformConfig, PullRequestRef};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// Without a token, requests are anonymous and only public repositories
    /// resolve.
    pub fn new(
        token: Option<&str>,
        owner: String,
        repo: String,
        host: Option<String>,
    ) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }

        if let Some(ref h) = host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                platform: Platform::GitHub,
                owner,
                repo,
                host,
            },
        })
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestRef> {
        debug!(pr_number = number, "getting PR");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(number)
            .await?;

        let base_repo = pr.base.repo.as_ref();
        // A deleted fork leaves no head repository to pull from.
        let cross_repository = match (pr.head.repo.as_ref(), base_repo) {
            (Some(head), Some(base)) => head.full_name != base.full_name,
            (None, _) => true,
            (Some(_), None) => false,
        };

        let clone_url = base_repo
            .and_then(|r| r.clone_url.as_ref())
            .map_or_else(|| self.config.clone_url(), ToString::to_string);

        let pr_ref = PullRequestRef {
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            source_branch: pr.head.ref_field.clone(),
            target_branch: pr.base.ref_field.clone(),
            clone_url,
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            cross_repository,
        };

        debug!(
            pr_number = number,
            source = %pr_ref.source_branch,
            target = %pr_ref.target_branch,
            "got PR"
        );
        Ok(pr_ref)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_anonymous_service_keeps_config() {
        let service = GitHubService::new(None, "owner".into(), "repo".into(), None).unwrap();
        assert_eq!(service.config().platform, Platform::GitHub);
        assert_eq!(service.config().clone_url(), "https://github.com/owner/repo.git");
    }

    #[tokio::test]
    async fn test_enterprise_host() {
        let service = GitHubService::new(
            Some("token"),
            "owner".into(),
            "repo".into(),
            Some("github.corp.example".into()),
        )
        .unwrap();
        assert_eq!(service.config().host_name(), "github.corp.example");
    }
}
