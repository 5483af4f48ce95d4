//! Error types for gimer

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while preparing or running a merge session
#[derive(Debug, Error)]
pub enum Error {
    /// The version-control tool exited with a non-zero status
    #[error("git {} failed: {}", command_line(.verb, .args), failure_text(.stderr, .stdout, .code.as_ref()))]
    ToolFailure {
        /// Verb that was invoked (e.g. `merge`)
        verb: String,
        /// Arguments following the verb
        args: Vec<String>,
        /// Captured standard error
        stderr: String,
        /// Captured standard output (empty unless piped)
        stdout: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },

    /// The version-control executable could not be started
    #[error("failed to run {program}: {source}")]
    ToolSpawn {
        /// Program that was launched
        program: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The user declined a confirmation prompt
    #[error("aborted by user: {0}")]
    UserAborted(String),

    /// Local path has no repository metadata
    #[error("not a git repository: {} ({reason})", .path.display())]
    NotARepository {
        /// Path that was inspected
        path: PathBuf,
        /// Why the repository could not be prepared
        reason: String,
    },

    /// Conflict resolution ended without a merge in progress
    #[error("merge conflict was not resolved")]
    ConflictUnresolved,

    /// No branches were found on the remote
    #[error("no branches found on remote '{0}'")]
    NoRemoteBranches(String),

    /// A branch resolved to an empty name
    #[error("{0} branch must not be empty")]
    EmptyBranch(&'static str),

    /// URL could not be interpreted as a supported repository
    #[error("unsupported repository URL: {0}")]
    UnsupportedUrl(String),

    /// Pull request head lives in a different repository
    #[error("pull request {0} comes from another repository; merge it from the fork instead")]
    CrossRepositoryPullRequest(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitLab API error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Authentication error
    #[error("authentication error: {0}")]
    Auth(String),

    /// Settings file error
    #[error("config error: {0}")]
    Config(String),

    /// Repository cache error
    #[error("cache error: {0}")]
    Cache(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Octocrab error
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),
}

impl Error {
    /// Whether this error represents a deliberate user choice rather than a fault
    pub const fn is_abort(&self) -> bool {
        matches!(self, Self::UserAborted(_) | Self::ConflictUnresolved)
    }

    /// Combined failure text of a tool failure (stderr followed by stdout)
    pub fn tool_output(&self) -> Option<String> {
        match self {
            Self::ToolFailure { stderr, stdout, .. } => Some(format!("{stderr}\n{stdout}")),
            _ => None,
        }
    }
}

fn command_line(verb: &str, args: &[String]) -> String {
    if args.is_empty() {
        verb.to_string()
    } else {
        format!("{verb} {}", args.join(" "))
    }
}

fn failure_text(stderr: &str, stdout: &str, code: Option<&i32>) -> String {
    let text = match stderr.trim() {
        "" => stdout.trim(),
        stderr => stderr,
    };
    if !text.is_empty() {
        return text.to_string();
    }
    // Interactive commands write straight to the terminal.
    code.map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exited with status {code}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failure_message_includes_command_and_stderr() {
        let err = Error::ToolFailure {
            verb: "push".to_string(),
            args: vec!["origin".to_string(), "main".to_string()],
            stderr: "rejected\n".to_string(),
            stdout: String::new(),
            code: Some(1),
        };
        assert_eq!(err.to_string(), "git push origin main failed: rejected");
    }

    #[test]
    fn test_tool_failure_falls_back_to_stdout() {
        let err = Error::ToolFailure {
            verb: "merge".to_string(),
            args: vec![],
            stderr: String::new(),
            stdout: "CONFLICT (content): a.txt".to_string(),
            code: Some(1),
        };
        assert_eq!(err.to_string(), "git merge failed: CONFLICT (content): a.txt");
    }

    #[test]
    fn test_silent_failure_reports_exit_status() {
        let err = Error::ToolFailure {
            verb: "mergetool".to_string(),
            args: vec![],
            stderr: String::new(),
            stdout: "\n".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "git mergetool failed: exited with status 2");

        let killed = Error::ToolFailure {
            verb: "mergetool".to_string(),
            args: vec![],
            stderr: String::new(),
            stdout: String::new(),
            code: None,
        };
        assert_eq!(killed.to_string(), "git mergetool failed: terminated by signal");
    }

    #[test]
    fn test_is_abort() {
        assert!(Error::UserAborted("push".into()).is_abort());
        assert!(Error::ConflictUnresolved.is_abort());
        assert!(!Error::NoRemoteBranches("origin".into()).is_abort());
    }
}
