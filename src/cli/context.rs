//! Resolve what the user pointed gimer at
//!
//! A repository URL is used as-is. A pull/merge request URL is looked up on
//! its hosting service and supplies the clone URL plus default branches.

use crate::cli::style::{Stylize, check, spinner_style};
use gimer::error::{Error, Result};
use gimer::platform::{create_platform_service, parse_pull_request_url};
use gimer::types::{PullRequestLocator, PullRequestRef};
use indicatif::ProgressBar;
use std::time::Duration;

/// Repository and branches a session will work on
#[derive(Debug, Clone)]
pub struct MergeTarget {
    /// URL to clone from
    pub repo_url: String,
    /// Branch to merge from, if known
    pub source: Option<String>,
    /// Branch to merge into, if known
    pub target: Option<String>,
    /// PR/MR the branches came from
    pub pull_request: Option<PullRequestRef>,
}

/// Turn the positional argument into a [`MergeTarget`]
///
/// Explicit `--source`/`--target` values win over the PR/MR's branches.
pub async fn resolve_target(
    input: &str,
    source: Option<String>,
    target: Option<String>,
) -> Result<MergeTarget> {
    let Some(locator) = parse_pull_request_url(input) else {
        return Ok(MergeTarget {
            repo_url: input.to_string(),
            source,
            target,
            pull_request: None,
        });
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Resolving {}...", input.emphasis()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let pr = match lookup(&locator).await {
        Ok(pr) => pr,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    spinner.finish_with_message(format!(
        "{} #{} {}",
        check(),
        pr.number,
        pr.title.emphasis()
    ));

    if pr.cross_repository {
        return Err(Error::CrossRepositoryPullRequest(input.to_string()));
    }

    Ok(MergeTarget {
        repo_url: pr.clone_url.clone(),
        source: source.or_else(|| Some(pr.source_branch.clone())),
        target: target.or_else(|| Some(pr.target_branch.clone())),
        pull_request: Some(pr),
    })
}

async fn lookup(locator: &PullRequestLocator) -> Result<PullRequestRef> {
    let platform = create_platform_service(&locator.config).await?;
    platform.get_pull_request(locator.number).await
}
