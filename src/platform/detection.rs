//! Repository and pull-request URL parsing

use crate::error::{Error, Result};
use crate::types::{Platform, PlatformConfig, PullRequestLocator};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Host used for `file://` URLs and absolute paths
pub const LOCAL_HOST: &str = "local";

/// `user@host:owner/repo` (scp-like ssh syntax)
static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^@/\s]+@)?([^:/\s]{2,}):(.+)$").expect("static regex is valid")
});

/// Where a remote repository lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    /// Lowercased host name, or [`LOCAL_HOST`]
    pub host: String,
    /// Owner or group path (may contain `/`)
    pub owner: String,
    /// Repository name without `.git`
    pub repo: String,
}

/// Split a clone URL into host, owner and repository
///
/// Accepts `https://`, `ssh://`, `git://`, `file://`, scp-like
/// `git@host:owner/repo` and absolute local paths. Returns `None` for
/// anything else, including paths with `.` or `..` segments.
pub fn parse_remote_url(url: &str) -> Option<RemoteLocation> {
    let url = url.trim().trim_end_matches('/');

    let (host, path) = if url.contains("://") {
        let parsed = Url::parse(url).ok()?;
        if parsed.scheme() == "file" {
            (LOCAL_HOST.to_string(), parsed.path().to_string())
        } else {
            (parsed.host_str()?.to_string(), parsed.path().to_string())
        }
    } else if url.starts_with('/') {
        (LOCAL_HOST.to_string(), url.to_string())
    } else {
        let caps = SCP_LIKE.captures(url)?;
        (caps[1].to_string(), caps[2].to_string())
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.iter().any(|s| *s == "." || *s == "..") {
        return None;
    }
    let (repo, owner) = segments.split_last()?;
    let repo = repo.strip_suffix(".git").unwrap_or(*repo);
    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    Some(RemoteLocation {
        host: host.to_ascii_lowercase(),
        owner: owner.join("/"),
        repo: repo.to_string(),
    })
}

fn env_host(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_ascii_lowercase())
}

fn platform_for_host(host: &str) -> Option<Platform> {
    match host {
        "github.com" => return Some(Platform::GitHub),
        "gitlab.com" => return Some(Platform::GitLab),
        _ => {}
    }
    if env_host("GH_HOST").as_deref() == Some(host) {
        return Some(Platform::GitHub);
    }
    if env_host("GITLAB_HOST").as_deref() == Some(host) || host.contains("gitlab") {
        return Some(Platform::GitLab);
    }
    None
}

fn custom_host(platform: Platform, host: &str) -> Option<String> {
    let default = match platform {
        Platform::GitHub => "github.com",
        Platform::GitLab => "gitlab.com",
    };
    (host != default).then(|| host.to_string())
}

/// Detect the hosting platform of a remote URL
pub fn detect_platform(url: &str) -> Option<Platform> {
    parse_remote_url(url).and_then(|loc| platform_for_host(&loc.host))
}

/// Parse a remote URL into a [`PlatformConfig`]
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    let loc = parse_remote_url(url).ok_or_else(|| Error::UnsupportedUrl(url.to_string()))?;
    let platform =
        platform_for_host(&loc.host).ok_or_else(|| Error::UnsupportedUrl(url.to_string()))?;

    Ok(PlatformConfig {
        platform,
        host: custom_host(platform, &loc.host),
        owner: loc.owner,
        repo: loc.repo,
    })
}

/// Recognise a pull/merge request web URL
///
/// - GitHub: `https://host/owner/repo/pull/<n>[/files…]`
/// - GitLab: `https://host/group/…/repo/-/merge_requests/<iid>[/diffs…]`
pub fn parse_pull_request_url(url: &str) -> Option<PullRequestLocator> {
    let parsed = Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?.to_ascii_lowercase();
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();

    if let Some(dash) = segments.iter().position(|s| *s == "-")
        && segments.get(dash + 1) == Some(&"merge_requests")
    {
        let number = segments.get(dash + 2)?.parse().ok()?;
        let (repo, owner) = segments[..dash].split_last()?;
        if owner.is_empty() {
            return None;
        }
        return Some(PullRequestLocator {
            config: PlatformConfig {
                platform: Platform::GitLab,
                host: custom_host(Platform::GitLab, &host),
                owner: owner.join("/"),
                repo: (*repo).to_string(),
            },
            number,
        });
    }

    if segments.len() >= 4 && segments[2] == "pull" {
        let number = segments[3].parse().ok()?;
        return Some(PullRequestLocator {
            config: PlatformConfig {
                platform: Platform::GitHub,
                host: custom_host(Platform::GitHub, &host),
                owner: segments[0].to_string(),
                repo: segments[1].to_string(),
            },
            number,
        });
    }

    None
}
