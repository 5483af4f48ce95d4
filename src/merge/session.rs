//! Merge session data

use crate::error::{Error, Result};
use crate::types::ExecutionConfig;
use std::path::{Path, PathBuf};

/// Default remote name
pub const DEFAULT_REMOTE: &str = "origin";

/// What the caller asks the orchestrator to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Local working copy location
    pub repo_path: PathBuf,
    /// Remote URL used when the working copy has to be cloned
    pub repo_url: String,
    /// Branch to merge from, asked interactively when missing
    pub source_branch: Option<String>,
    /// Branch to merge into, asked interactively when missing
    pub target_branch: Option<String>,
    /// Remote used for fetch, pull and push
    pub remote: String,
}

impl MergeRequest {
    /// Request with no branches chosen yet
    pub fn new(repo_path: impl Into<PathBuf>, repo_url: impl Into<String>) -> Self {
        Self {
            repo_path: repo_path.into(),
            repo_url: repo_url.into(),
            source_branch: None,
            target_branch: None,
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    /// Set the source branch
    #[must_use]
    pub fn with_source(mut self, branch: Option<String>) -> Self {
        self.source_branch = branch;
        self
    }

    /// Set the target branch
    #[must_use]
    pub fn with_target(mut self, branch: Option<String>) -> Self {
        self.target_branch = branch;
        self
    }

    /// Use a remote other than `origin`
    #[must_use]
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }
}

/// A merge attempt whose branches are resolved
///
/// Only constructible with two non-empty branch names, so nothing can be
/// checked out before resolution finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSession {
    repo_path: PathBuf,
    source_branch: String,
    target_branch: String,
    config: ExecutionConfig,
}

impl MergeSession {
    /// Create a session; fails if either branch name is blank
    pub fn new(
        repo_path: PathBuf,
        source_branch: String,
        target_branch: String,
        config: ExecutionConfig,
    ) -> Result<Self> {
        if source_branch.trim().is_empty() {
            return Err(Error::EmptyBranch("source"));
        }
        if target_branch.trim().is_empty() {
            return Err(Error::EmptyBranch("target"));
        }
        Ok(Self {
            repo_path,
            source_branch,
            target_branch,
            config,
        })
    }

    /// Working copy location
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Branch merged from
    pub fn source_branch(&self) -> &str {
        &self.source_branch
    }

    /// Branch merged into
    pub fn target_branch(&self) -> &str {
        &self.target_branch
    }

    /// Execution settings of the session
    pub const fn config(&self) -> ExecutionConfig {
        self.config
    }
}

/// Workflow phase the orchestrator is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePhase {
    /// Making sure a working copy exists
    Initializing,
    /// Checking for local changes
    CheckingCleanliness,
    /// Fetching remote refs
    FetchRefs,
    /// Choosing source and target
    ResolvingBranches,
    /// Bringing both branches up to date
    Syncing,
    /// Running the merge
    Merging,
    /// Waiting on the merge tool
    ResolvingConflicts,
    /// Pushing the target branch
    Pushing,
    /// Finished
    Done,
}

impl std::fmt::Display for MergePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Initializing => "initializing",
            Self::CheckingCleanliness => "checking working copy",
            Self::FetchRefs => "fetching",
            Self::ResolvingBranches => "resolving branches",
            Self::Syncing => "syncing branches",
            Self::Merging => "merging",
            Self::ResolvingConflicts => "resolving conflicts",
            Self::Pushing => "pushing",
            Self::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// How a session ended when it did not fail
///
/// Failures are reported as `Err` from [`MergeOrchestrator::run`].
///
/// [`MergeOrchestrator::run`]: super::MergeOrchestrator::run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Target branch was merged and pushed
    Completed {
        /// Branch merged from
        source: String,
        /// Branch merged into
        target: String,
    },
    /// The user chose to stop
    Aborted {
        /// Why the session stopped
        reason: String,
    },
}

impl SessionOutcome {
    /// Whether the session ended in `Completed`
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
