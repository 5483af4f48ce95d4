//! Shared test helpers

#![allow(dead_code)]

mod git_fixture;
mod mock_git;

pub use git_fixture::{GIT_IDENTITY, TempRemote, git_available};
pub use mock_git::{GitCall, MockGit, RecordingProgress, ScriptedPrompter};

use gimer::merge::{MergeOrchestrator, MergeRequest, OrchestratorDeps};
use gimer::messages::Messages;
use gimer::types::{ConfirmPolicy, ExecutionConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const REPO_URL: &str = "https://github.com/owner/repo.git";

/// Orchestrator wired to scripted collaborators
pub struct Harness {
    pub git: Arc<MockGit>,
    pub prompter: Arc<ScriptedPrompter>,
    pub progress: Arc<RecordingProgress>,
    dir: TempDir,
}

impl Harness {
    /// Harness whose working copy already exists
    pub fn new() -> Self {
        let harness = Self::without_working_copy();
        std::fs::create_dir_all(harness.repo_path().join(".git")).unwrap();
        harness
    }

    /// Harness with nothing at the working-copy path yet
    pub fn without_working_copy() -> Self {
        Self {
            git: Arc::new(MockGit::new()),
            prompter: Arc::new(ScriptedPrompter::new()),
            progress: Arc::new(RecordingProgress::default()),
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn repo_path(&self) -> PathBuf {
        self.dir.path().join("github.com").join("owner").join("repo")
    }

    /// Request with no branches chosen
    pub fn request(&self) -> MergeRequest {
        MergeRequest::new(self.repo_path(), REPO_URL)
    }

    /// Request merging `source` into `target`
    pub fn request_for(&self, source: &str, target: &str) -> MergeRequest {
        self.request()
            .with_source(Some(source.to_string()))
            .with_target(Some(target.to_string()))
    }

    pub fn orchestrator(&self, request: MergeRequest, config: ExecutionConfig) -> MergeOrchestrator {
        let deps = OrchestratorDeps::new(
            self.git.clone(),
            self.prompter.clone(),
            self.progress.clone(),
        );
        MergeOrchestrator::new(request, config, deps, Messages::english())
    }
}

pub fn config(policy: ConfirmPolicy) -> ExecutionConfig {
    ExecutionConfig {
        dry_run: false,
        confirm_policy: policy,
    }
}

pub fn dry_run(policy: ConfirmPolicy) -> ExecutionConfig {
    ExecutionConfig {
        dry_run: true,
        confirm_policy: policy,
    }
}
