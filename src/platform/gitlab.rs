//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Platform, PlatformConfig, PullRequestRef};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: Option<String>,
    api_base: String,
    config: PlatformConfig,
    project_path: String,
}

#[derive(Deserialize)]
struct MergeRequest {
    iid: u64,
    title: String,
    web_url: String,
    source_branch: String,
    target_branch: String,
    source_project_id: u64,
    target_project_id: u64,
}

#[derive(Deserialize)]
struct Project {
    http_url_to_repo: String,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl GitLabService {
    /// Create a new GitLab service
    pub fn new(
        token: Option<String>,
        owner: String,
        repo: String,
        host: Option<String>,
    ) -> Result<Self> {
        let host = host.unwrap_or_else(|| "gitlab.com".to_string());
        let project_path = format!("{owner}/{repo}");

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitLabApi(format!("failed to create HTTP client: {e}")))?;

        let config_host = if host == "gitlab.com" {
            None
        } else {
            Some(host.clone())
        };

        Ok(Self {
            client,
            token,
            api_base: format!("https://{host}/api/v4"),
            config: PlatformConfig {
                platform: Platform::GitLab,
                owner,
                repo,
                host: config_host,
            },
            project_path,
        })
    }

    /// Send API requests to `base` instead of `https://<host>/api/v4`
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn encoded_project(&self) -> String {
        urlencoding::encode(&self.project_path).into_owned()
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.header("PRIVATE-TOKEN", token),
            None => request,
        }
    }
}

#[async_trait]
impl PlatformService for GitLabService {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestRef> {
        debug!(mr_iid = number, "getting MR");
        let project = self.encoded_project();

        let mr: MergeRequest = self
            .get(&self.api_url(&format!("/projects/{project}/merge_requests/{number}")))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        let repo: Project = self
            .get(&self.api_url(&format!("/projects/{project}")))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        debug!(
            mr_iid = mr.iid,
            source = %mr.source_branch,
            target = %mr.target_branch,
            "got MR"
        );

        Ok(PullRequestRef {
            number: mr.iid,
            title: mr.title,
            source_branch: mr.source_branch,
            target_branch: mr.target_branch,
            clone_url: repo.http_url_to_repo,
            html_url: mr.web_url,
            cross_repository: mr.source_project_id != mr.target_project_id,
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
