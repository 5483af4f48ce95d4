//! Core types for gimer

use serde::{Deserialize, Serialize};

/// Verbs that change the state of the remote repository
pub const ORIGIN_AFFECTING_VERBS: &[&str] = &["push"];

/// When the executor asks before running a command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmPolicy {
    /// Never ask
    #[default]
    None,
    /// Ask before commands that change the remote
    #[serde(alias = "origin_affecting")]
    Origin,
    /// Ask before every command
    All,
}

impl ConfirmPolicy {
    /// Whether a command with `verb` requires approval under this policy
    pub fn requires_confirmation(self, verb: &str) -> bool {
        match self {
            Self::None => false,
            Self::Origin => ORIGIN_AFFECTING_VERBS.contains(&verb),
            Self::All => true,
        }
    }
}

impl std::fmt::Display for ConfirmPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Origin => write!(f, "origin"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Settings that govern every executor invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Log commands without running them
    pub dry_run: bool,
    /// Per-command confirmation policy
    pub confirm_policy: ConfirmPolicy,
}

/// How the subprocess is wired to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Pipe stdout and stderr
    Capture,
    /// Inherit stdout, pipe stderr
    Passthrough,
    /// Inherit everything (editors, merge tools)
    Interactive,
}

/// A single version-control command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// First argument to the tool (e.g. `push`)
    pub verb: String,
    /// Remaining arguments
    pub args: Vec<String>,
    /// Hand the terminal to the tool
    pub interactive: bool,
}

impl CommandInvocation {
    /// Build an invocation from a verb and its arguments
    pub fn new<I, S>(verb: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verb: verb.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            interactive: false,
        }
    }

    /// Mark the invocation as needing the terminal
    #[must_use]
    pub const fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Full argument vector passed to the tool
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.verb.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl std::fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "git {}", self.verb)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Hosting types (pull/merge request resolution)
// =============================================================================

/// Detected platform type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GitHub => write!(f, "GitHub"),
            Self::GitLab => write!(f, "GitLab"),
        }
    }
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Platform type
    pub platform: Platform,
    /// Repository owner (user, organization or nested group path)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com/gitlab.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// Host name, falling back to the public instance
    pub fn host_name(&self) -> &str {
        self.host.as_deref().unwrap_or(match self.platform {
            Platform::GitHub => "github.com",
            Platform::GitLab => "gitlab.com",
        })
    }

    /// HTTPS clone URL of the repository
    pub fn clone_url(&self) -> String {
        format!("https://{}/{}/{}.git", self.host_name(), self.owner, self.repo)
    }
}

/// A pull/merge request URL broken into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    /// Repository the request targets
    pub config: PlatformConfig,
    /// PR number (GitHub) or MR iid (GitLab)
    pub number: u64,
}

/// What gimer needs to know about a pull/merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// PR/MR number
    pub number: u64,
    /// PR/MR title
    pub title: String,
    /// Branch being merged (head / source)
    pub source_branch: String,
    /// Branch receiving the merge (base / target)
    pub target_branch: String,
    /// Clone URL of the target repository
    pub clone_url: String,
    /// Web URL for the PR/MR
    pub html_url: String,
    /// Whether the source branch lives in a fork
    pub cross_repository: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_decision_table() {
        for verb in ["push", "fetch", "pull", "merge", "clean", "reset"] {
            let origin = ORIGIN_AFFECTING_VERBS.contains(&verb);
            assert!(!ConfirmPolicy::None.requires_confirmation(verb));
            assert_eq!(ConfirmPolicy::Origin.requires_confirmation(verb), origin);
            assert!(ConfirmPolicy::All.requires_confirmation(verb));
        }
    }

    #[test]
    fn test_invocation_display() {
        let inv = CommandInvocation::new("pull", ["origin", "main"]);
        assert_eq!(inv.to_string(), "git pull origin main");
        assert_eq!(inv.argv(), vec!["pull", "origin", "main"]);
        assert!(!inv.interactive);
    }

    #[test]
    fn test_confirm_policy_parses_from_toml_values() {
        #[derive(Deserialize)]
        struct Wrapper {
            confirm: ConfirmPolicy,
        }
        let w: Wrapper = toml::from_str("confirm = \"origin\"").unwrap();
        assert_eq!(w.confirm, ConfirmPolicy::Origin);
        let w: Wrapper = toml::from_str("confirm = \"all\"").unwrap();
        assert_eq!(w.confirm, ConfirmPolicy::All);
    }

    #[test]
    fn test_clone_url_for_default_hosts() {
        let config = PlatformConfig {
            platform: Platform::GitLab,
            owner: "group/sub".to_string(),
            repo: "proj".to_string(),
            host: None,
        };
        assert_eq!(config.clone_url(), "https://gitlab.com/group/sub/proj.git");
    }
}
