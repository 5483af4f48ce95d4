//! Merge workflow state machine

use super::session::{MergePhase, MergeRequest, MergeSession, SessionOutcome};
use crate::error::{Error, Result};
use crate::git::{
    CommandRunner, GitExecutor, GitRepo, MergeOutcome, ProgressCallback, Prompter,
    has_git_metadata,
};
use crate::messages::Messages;
use crate::types::{ConfirmPolicy, ExecutionConfig};
use std::fs;
use std::sync::Arc;
use tracing::{debug, info};

/// Collaborators the orchestrator drives
#[derive(Clone)]
pub struct OrchestratorDeps {
    /// Spawns git
    pub runner: Arc<dyn CommandRunner>,
    /// Asks the user questions
    pub prompter: Arc<dyn Prompter>,
    /// Receives the command trace and status messages
    pub progress: Arc<dyn ProgressCallback>,
    /// Version-control executable
    pub program: String,
}

impl OrchestratorDeps {
    /// Collaborators running the default `git` executable
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        prompter: Arc<dyn Prompter>,
        progress: Arc<dyn ProgressCallback>,
    ) -> Self {
        Self {
            runner,
            prompter,
            progress,
            program: "git".to_string(),
        }
    }

    /// Use a different executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

/// Runs one merge attempt from clone to push
///
/// The working copy is process-wide mutable state with no locking; run one
/// orchestrator per working copy at a time.
pub struct MergeOrchestrator {
    request: MergeRequest,
    config: ExecutionConfig,
    repo: GitRepo,
    prompter: Arc<dyn Prompter>,
    progress: Arc<dyn ProgressCallback>,
    messages: Messages,
    phase: MergePhase,
}

impl MergeOrchestrator {
    /// Create an orchestrator for `request`
    pub fn new(
        request: MergeRequest,
        config: ExecutionConfig,
        deps: OrchestratorDeps,
        messages: Messages,
    ) -> Self {
        let executor = GitExecutor::new(
            request.repo_path.clone(),
            config,
            deps.runner,
            Arc::clone(&deps.prompter),
            Arc::clone(&deps.progress),
        )
        .with_program(deps.program)
        .with_confirm_prompt(messages.execute_command.clone());
        let repo = GitRepo::new(executor, request.remote.clone());

        Self {
            request,
            config,
            repo,
            prompter: deps.prompter,
            progress: deps.progress,
            messages,
            phase: MergePhase::Initializing,
        }
    }

    /// Phase reached so far; on failure, the phase that failed
    pub const fn phase(&self) -> MergePhase {
        self.phase
    }

    /// Run the workflow to a terminal outcome
    ///
    /// Declined prompts and abandoned conflict resolution end in
    /// [`SessionOutcome::Aborted`]; every other failure is returned as `Err`
    /// unchanged. Nothing is retried.
    pub fn run(&mut self) -> Result<SessionOutcome> {
        match self.drive() {
            Ok(session) => {
                self.enter(MergePhase::Done);
                Ok(SessionOutcome::Completed {
                    source: session.source_branch().to_string(),
                    target: session.target_branch().to_string(),
                })
            }
            Err(err) if err.is_abort() => {
                info!(phase = %self.phase, reason = %err, "merge session aborted");
                Ok(SessionOutcome::Aborted {
                    reason: abort_reason(&err),
                })
            }
            Err(err) => {
                debug!(phase = %self.phase, error = %err, "merge session failed");
                Err(err)
            }
        }
    }

    fn drive(&mut self) -> Result<MergeSession> {
        self.initialize()?;
        self.ensure_clean()?;

        self.enter(MergePhase::FetchRefs);
        self.repo.fetch()?;

        let session = self.resolve_branches()?;
        self.sync(&session)?;
        self.merge(&session)?;

        self.enter(MergePhase::Pushing);
        self.repo.push(session.target_branch())?;

        Ok(session)
    }

    fn enter(&mut self, phase: MergePhase) {
        debug!(from = %self.phase, to = %phase, "merge phase");
        self.phase = phase;
    }

    fn initialize(&mut self) -> Result<()> {
        self.enter(MergePhase::Initializing);
        let path = self.request.repo_path.clone();

        if has_git_metadata(&path) {
            debug!(path = %path.display(), "using existing working copy");
            return Ok(());
        }

        self.progress.on_message(&format!(
            "{} {}",
            self.messages.cloning, self.request.repo_url
        ));

        if !self.config.dry_run {
            fs::create_dir_all(&path)?;
        }

        self.repo
            .clone_from(&self.request.repo_url)
            .map_err(|err| match err {
                err if err.is_abort() => err,
                err => Error::NotARepository {
                    path: path.clone(),
                    reason: err.to_string(),
                },
            })?;

        if !self.config.dry_run && !has_git_metadata(&path) {
            return Err(Error::NotARepository {
                path,
                reason: "clone finished without creating .git".to_string(),
            });
        }
        Ok(())
    }

    fn ensure_clean(&mut self) -> Result<()> {
        self.enter(MergePhase::CheckingCleanliness);
        if self.repo.is_clean()? {
            return Ok(());
        }

        self.progress.on_message(&self.messages.dirty_warning);
        if !self.prompter.confirm(&self.messages.discard_changes, false)? {
            return Err(Error::UserAborted(self.messages.dirty_declined.clone()));
        }
        self.repo.clean_working_directory()
    }

    fn resolve_branches(&mut self) -> Result<MergeSession> {
        self.enter(MergePhase::ResolvingBranches);

        let (source, target) = match (
            self.request.source_branch.clone(),
            self.request.target_branch.clone(),
        ) {
            (Some(source), Some(target)) => (source, target),
            (source, target) => {
                let branches = self.repo.remote_branches()?;
                if branches.is_empty() {
                    return Err(Error::NoRemoteBranches(self.request.remote.clone()));
                }
                let source = match source {
                    Some(branch) => branch,
                    None => self.prompter.select(&self.messages.select_source, &branches)?,
                };
                let target = match target {
                    Some(branch) => branch,
                    None => self.prompter.select(&self.messages.select_target, &branches)?,
                };
                (source, target)
            }
        };

        let session =
            MergeSession::new(self.request.repo_path.clone(), source, target, self.config)?;

        if self.config.confirm_policy != ConfirmPolicy::None {
            self.progress.on_message(&format!(
                "{} ← {}",
                session.target_branch(),
                session.source_branch()
            ));
            if !self.prompter.confirm(&self.messages.proceed, true)? {
                return Err(Error::UserAborted(self.messages.proceed_declined.clone()));
            }
        }
        Ok(session)
    }

    fn sync(&mut self, session: &MergeSession) -> Result<()> {
        self.enter(MergePhase::Syncing);
        // The target must be checked out last so the merge lands on it.
        for branch in [session.source_branch(), session.target_branch()] {
            self.repo.checkout(branch)?;
            self.repo.pull(branch)?;
        }
        Ok(())
    }

    fn merge(&mut self, session: &MergeSession) -> Result<()> {
        self.enter(MergePhase::Merging);
        self.progress.on_message(&format!(
            "{} {} ← {}",
            self.messages.merging,
            session.target_branch(),
            session.source_branch()
        ));

        match self.repo.merge(session.source_branch()) {
            MergeOutcome::Success => Ok(()),
            MergeOutcome::Conflict { output } => {
                debug!("merge stopped on conflicts");
                self.resolve_conflicts(output.trim())
            }
            MergeOutcome::Fatal(err) => Err(err),
        }
    }

    fn resolve_conflicts(&mut self, listing: &str) -> Result<()> {
        self.enter(MergePhase::ResolvingConflicts);
        self.progress.on_message(&self.messages.conflict_detected);
        if !listing.is_empty() {
            self.progress.on_message(listing);
        }
        self.repo.resolve_conflicts()?;

        if !self.repo.is_merge_in_progress()? {
            return Err(Error::ConflictUnresolved);
        }

        self.progress.on_message(&self.messages.conflict_resolved);
        self.repo.commit_merge()
    }
}

fn abort_reason(err: &Error) -> String {
    match err {
        Error::UserAborted(reason) => reason.clone(),
        other => other.to_string(),
    }
}
