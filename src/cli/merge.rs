//! Merge command - run one merge session against a cached working copy

use crate::cli::context::resolve_target;
use crate::cli::style::{Stylize, check, hyperlink};
use crate::cli::{CliProgress, DialoguerPrompter};
use anstream::println;
use gimer::cache::RepoCache;
use gimer::config::Settings;
use gimer::error::{Error, Result};
use gimer::git::SystemRunner;
use gimer::merge::{MergeOrchestrator, MergeRequest, OrchestratorDeps, SessionOutcome};
use gimer::types::{ConfirmPolicy, ExecutionConfig};
use std::sync::Arc;
use tracing::debug;

/// Options for the merge command
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Branch to merge from
    pub source: Option<String>,
    /// Branch to merge into
    pub target: Option<String>,
    /// Print commands without running them
    pub dry_run: bool,
    /// Remove the working copy afterwards
    pub cleanup: bool,
    /// Policy from the command line; `None` falls back to the settings file
    pub confirm_policy: Option<ConfirmPolicy>,
    /// Remote from the command line
    pub remote: Option<String>,
}

/// Run the merge command
#[allow(clippy::future_not_send)]
pub async fn run_merge(repository: &str, options: MergeOptions) -> Result<()> {
    let settings = Settings::load()?;
    let target = resolve_target(repository, options.source, options.target).await?;

    let cache = RepoCache::from_setting(settings.cache_dir.as_deref());
    // Dry-run leaves the filesystem alone.
    let repo_path = if options.dry_run {
        cache.path_for(&target.repo_url)?
    } else {
        cache.repo_path(&target.repo_url)?
    };

    let config = ExecutionConfig {
        dry_run: options.dry_run,
        confirm_policy: options
            .confirm_policy
            .or(settings.confirm)
            .unwrap_or_default(),
    };
    let remote = options
        .remote
        .unwrap_or_else(|| settings.remote().to_string());
    debug!(?config, %remote, path = %repo_path.display(), "starting merge session");

    println!("{} {}", "Repository:".muted(), target.repo_url.accent());
    println!("{} {}", "Working copy:".muted(), repo_path.display());
    if config.dry_run {
        println!("{}", "Dry run: commands are printed, not executed".warn());
    }
    println!();

    let request = MergeRequest::new(&repo_path, &target.repo_url)
        .with_source(target.source)
        .with_target(target.target)
        .with_remote(remote);
    let deps = OrchestratorDeps::new(
        Arc::new(SystemRunner),
        Arc::new(DialoguerPrompter),
        Arc::new(CliProgress),
    )
    .with_program(settings.git_program());
    let messages = settings.messages();

    // Prompts and git block; keep them off the async runtime.
    let (outcome, phase) = tokio::task::spawn_blocking(move || {
        let mut orchestrator = MergeOrchestrator::new(request, config, deps, messages);
        let outcome = orchestrator.run();
        (outcome, orchestrator.phase())
    })
    .await
    .map_err(|e| Error::Internal(format!("merge task failed: {e}")))?;

    if (options.cleanup || settings.cleanup) && !config.dry_run {
        match cache.cleanup_repository(&repo_path) {
            Ok(()) => println!("{}", "Removed cached working copy".muted()),
            Err(e) => println!(
                "{}",
                format!("⚠️  Failed to remove working copy: {e}").warn()
            ),
        }
    }

    println!();
    match outcome {
        Ok(SessionOutcome::Completed { source, target: into }) => {
            println!(
                "{} {} {} ← {}",
                check(),
                "Merge complete:".success(),
                into.accent(),
                source.accent()
            );
            if let Some(pr) = target.pull_request.filter(|pr| !pr.html_url.is_empty()) {
                println!(
                    "   {}",
                    hyperlink(&format!("#{}", pr.number), &pr.html_url).muted()
                );
            }
            Ok(())
        }
        Ok(SessionOutcome::Aborted { reason }) => {
            println!("{} {reason}", "Aborted:".warn());
            Ok(())
        }
        Err(e) => {
            println!("{} {phase}", "Merge failed while".error());
            Err(e)
        }
    }
}
