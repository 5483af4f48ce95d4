//! Typed git operations used by the merge workflow

use super::GitExecutor;
use crate::error::{Error, Result};
use crate::types::CommandInvocation;
use std::path::Path;
use tracing::debug;

/// Word git prints when a merge stops on conflicting content
///
/// Git's wording is not a stable contract. Exit codes do not separate
/// conflicts from other merge failures, so the text is the only signal.
pub const CONFLICT_MARKER: &str = "CONFLICT";

/// Result of attempting a merge
#[derive(Debug)]
pub enum MergeOutcome {
    /// Merge finished (including fast-forward and no-op merges)
    Success,
    /// Merge stopped on content conflicts and awaits resolution
    Conflict {
        /// Failure text reported by git
        output: String,
    },
    /// Merge failed for any other reason
    Fatal(Error),
}

/// Whether failure text from `git merge` reports a content conflict
pub fn is_conflict_text(text: &str) -> bool {
    text.contains(CONFLICT_MARKER)
}

/// Whether `path` holds a git working copy
pub fn has_git_metadata(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Parse `git branch --remotes --format=%(refname:short)` output
///
/// Strips the `<remote>/` prefix and drops the symbolic `HEAD` entry, which
/// recent git versions shorten to just the remote name.
pub fn parse_remote_branches(output: &str, remote: &str) -> Vec<String> {
    let prefix = format!("{remote}/");
    let mut branches: Vec<String> = output
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(&prefix))
        .filter(|name| !name.is_empty() && *name != "HEAD")
        .map(String::from)
        .collect();
    branches.dedup();
    branches
}

/// A working copy driven through a [`GitExecutor`]
pub struct GitRepo {
    executor: GitExecutor,
    remote: String,
}

impl GitRepo {
    /// Wrap an executor; `remote` names the remote used for fetch/pull/push
    pub fn new(executor: GitExecutor, remote: impl Into<String>) -> Self {
        Self {
            executor,
            remote: remote.into(),
        }
    }

    /// The underlying executor
    pub const fn executor(&self) -> &GitExecutor {
        &self.executor
    }

    /// Remote name
    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn run(&self, verb: &str, args: &[&str]) -> Result<()> {
        self.executor
            .execute(&CommandInvocation::new(verb, args.iter().copied()), false)
            .map(drop)
    }

    fn query(&self, verb: &str, args: &[&str]) -> Result<String> {
        self.executor
            .execute(&CommandInvocation::new(verb, args.iter().copied()), true)
    }

    /// Clone `url` into the (empty) working directory
    pub fn clone_from(&self, url: &str) -> Result<()> {
        self.run("clone", &[url, "."])
    }

    /// Whether the working tree has no changes, staged or untracked
    pub fn is_clean(&self) -> Result<bool> {
        Ok(self.query("status", &["--porcelain"])?.trim().is_empty())
    }

    /// Discard untracked files and reset tracked ones
    pub fn clean_working_directory(&self) -> Result<()> {
        self.run("clean", &["-fdx"])?;
        self.run("reset", &["--hard"])
    }

    /// Fetch refs from the remote
    pub fn fetch(&self) -> Result<()> {
        self.run("fetch", &[self.remote.as_str()])
    }

    /// Branch names available on the remote
    pub fn remote_branches(&self) -> Result<Vec<String>> {
        let output = self.query("branch", &["--format=%(refname:short)", "--remotes"])?;
        let branches = parse_remote_branches(&output, &self.remote);
        debug!(count = branches.len(), "listed remote branches");
        Ok(branches)
    }

    /// Check out `branch`
    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.run("checkout", &[branch])
    }

    /// Pull `branch` from the remote into the current branch
    pub fn pull(&self, branch: &str) -> Result<()> {
        self.run("pull", &[self.remote.as_str(), branch])
    }

    /// Push `branch` to the remote
    pub fn push(&self, branch: &str) -> Result<()> {
        self.run("push", &[self.remote.as_str(), branch])
    }

    /// Merge `source` into the current branch
    pub fn merge(&self, source: &str) -> MergeOutcome {
        match self.query("merge", &["--no-edit", source]) {
            Ok(_) => MergeOutcome::Success,
            Err(err) => match err.tool_output() {
                Some(output) if is_conflict_text(&output) => MergeOutcome::Conflict { output },
                _ => MergeOutcome::Fatal(err),
            },
        }
    }

    /// Whether a merge is waiting to be finalized or aborted
    pub fn is_merge_in_progress(&self) -> Result<bool> {
        match self.query("rev-parse", &["--verify", "MERGE_HEAD"]) {
            Ok(_) => Ok(true),
            Err(Error::ToolFailure { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Hand the terminal to the configured merge tool
    pub fn resolve_conflicts(&self) -> Result<()> {
        self.executor.execute(
            &CommandInvocation::new("mergetool", Vec::<String>::new()).interactive(),
            false,
        )?;
        Ok(())
    }

    /// Finalize the merge with the prepared merge message
    pub fn commit_merge(&self) -> Result<()> {
        self.run("commit", &["--no-edit"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_branches_strips_prefix() {
        let output = "origin/main\norigin/develop\norigin/HEAD\n";
        assert_eq!(parse_remote_branches(output, "origin"), vec!["main", "develop"]);
    }

    #[test]
    fn test_parse_remote_branches_drops_bare_remote_head() {
        let output = "origin\norigin/feature/x\norigin/main\n";
        assert_eq!(
            parse_remote_branches(output, "origin"),
            vec!["feature/x", "main"]
        );
    }

    #[test]
    fn test_parse_remote_branches_ignores_other_remotes() {
        let output = "upstream/main\norigin/main\n";
        assert_eq!(parse_remote_branches(output, "origin"), vec!["main"]);
        assert_eq!(parse_remote_branches(output, "upstream"), vec!["main"]);
    }

    #[test]
    fn test_parse_remote_branches_empty() {
        assert!(parse_remote_branches("", "origin").is_empty());
    }

    #[test]
    fn test_conflict_text_is_case_sensitive() {
        assert!(is_conflict_text("CONFLICT (content): Merge conflict in a.txt"));
        assert!(is_conflict_text("CONFLICT: merge conflict"));
        assert!(!is_conflict_text("conflict in a.txt"));
        assert!(!is_conflict_text("fatal: refusing to merge unrelated histories"));
    }

    #[test]
    fn test_has_git_metadata() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(!has_git_metadata(temp.path()));
        std::fs::create_dir(temp.path().join(".git")).unwrap();
        assert!(has_git_metadata(temp.path()));
    }
}
