//! Version-control command execution
//!
//! Every git side effect flows through [`GitExecutor`], so dry-run and
//! confirmation policy apply uniformly. The seams it calls out to are traits:
//!
//! - [`CommandRunner`] - spawns the external tool
//! - [`Prompter`] - asks the user (per-command confirmation, branch choice)
//! - [`ProgressCallback`] - receives the human-readable command trace
//!
//! [`GitRepo`] layers the typed operations the merge workflow needs on top.

mod executor;
mod repo;
mod runner;

pub use executor::GitExecutor;
pub use repo::{
    CONFLICT_MARKER, GitRepo, MergeOutcome, has_git_metadata, is_conflict_text,
    parse_remote_branches,
};
pub use runner::SystemRunner;

use crate::error::Result;
use crate::types::{CommandInvocation, StdioMode};
use std::path::Path;

/// Exit status and output of a finished subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Standard output (empty when inherited)
    pub stdout: String,
    /// Standard error (empty when inherited)
    pub stderr: String,
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl ToolOutput {
    /// Successful run with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    /// Failed run with the given stderr
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
            code: Some(1),
        }
    }
}

/// Spawns the external version-control tool
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` inside `cwd` and wait for it to finish
    fn run(
        &self,
        program: &str,
        cwd: &Path,
        args: &[String],
        stdio: StdioMode,
    ) -> std::io::Result<ToolOutput>;
}

/// Interactive questions put to the user
pub trait Prompter: Send + Sync {
    /// Pick one entry from `choices`
    fn select(&self, prompt: &str, choices: &[String]) -> Result<String>;

    /// Yes/no question with a default answer
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Receives progress updates from the executor and orchestrator
pub trait ProgressCallback: Send + Sync {
    /// Called before every command, including in dry-run mode
    fn on_command(&self, invocation: &CommandInvocation, dry_run: bool);

    /// Called for status messages
    fn on_message(&self, message: &str);
}

/// Progress sink that discards everything
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_command(&self, _invocation: &CommandInvocation, _dry_run: bool) {}

    fn on_message(&self, _message: &str) {}
}
