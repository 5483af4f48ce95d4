//! Authentication for GitHub and GitLab
//!
//! Supports environment variables and CLI-based auth (gh, glab).

mod github;
mod gitlab;

pub use github::{GitHubAuthConfig, get_github_auth};
pub use gitlab::{GitLabAuthConfig, get_gitlab_auth};

use tokio::process::Command;
use tracing::debug;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh or glab)
    Cli,
    /// Token from environment variable
    EnvVar,
}

/// First non-empty value among `vars`
fn token_from_env(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Trimmed stdout of a successful CLI call, if any
async fn token_from_cli(program: &str, args: &[&str]) -> Option<String> {
    let output = match Command::new(program).args(args).output().await {
        Ok(output) => output,
        Err(e) => {
            debug!(program, error = %e, "auth CLI not available");
            return None;
        }
    };
    if !output.status.success() {
        debug!(program, status = %output.status, "auth CLI returned no token");
        return None;
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}
