//! Platform services for GitHub and GitLab
//!
//! Only used to turn a pull/merge request URL into the branches and clone
//! URL the merge needs. Nothing is written back to the hosting service.

mod detection;
mod factory;
mod github;
mod gitlab;

pub use detection::{
    LOCAL_HOST, RemoteLocation, detect_platform, parse_pull_request_url, parse_remote_url,
    parse_repo_info,
};
pub use factory::create_platform_service;
pub use github::GitHubService;
pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{PlatformConfig, PullRequestRef};
use async_trait::async_trait;

/// Read-only pull request lookup
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Fetch branch and repository details of a PR/MR
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestRef>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
