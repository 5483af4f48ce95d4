//! The single choke point for git side effects

use super::{CommandRunner, ProgressCallback, Prompter};
use crate::error::{Error, Result};
use crate::types::{CommandInvocation, ExecutionConfig, StdioMode};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Default prompt shown before a command that needs approval
const DEFAULT_CONFIRM_PROMPT: &str = "Execute this command?";

/// Runs git commands under a fixed [`ExecutionConfig`]
///
/// The executor owns no state beyond its configuration. It does not retry:
/// a failed fetch, pull or push is reported once and left to the caller.
pub struct GitExecutor {
    program: String,
    workdir: PathBuf,
    config: ExecutionConfig,
    runner: Arc<dyn CommandRunner>,
    prompter: Arc<dyn Prompter>,
    progress: Arc<dyn ProgressCallback>,
    confirm_prompt: String,
}

impl GitExecutor {
    /// Create an executor that runs commands inside `workdir`
    pub fn new(
        workdir: impl Into<PathBuf>,
        config: ExecutionConfig,
        runner: Arc<dyn CommandRunner>,
        prompter: Arc<dyn Prompter>,
        progress: Arc<dyn ProgressCallback>,
    ) -> Self {
        Self {
            program: "git".to_string(),
            workdir: workdir.into(),
            config,
            runner,
            prompter,
            progress,
            confirm_prompt: DEFAULT_CONFIRM_PROMPT.to_string(),
        }
    }

    /// Use a different executable than `git`
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Text of the per-command confirmation prompt
    #[must_use]
    pub fn with_confirm_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.confirm_prompt = prompt.into();
        self
    }

    /// Configuration every invocation runs under
    pub const fn config(&self) -> ExecutionConfig {
        self.config
    }

    /// Directory commands run in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run one command
    ///
    /// Returns stdout when `capture_output` is set, an empty string otherwise
    /// (and always in dry-run mode).
    pub fn execute(&self, invocation: &CommandInvocation, capture_output: bool) -> Result<String> {
        self.progress.on_command(invocation, self.config.dry_run);
        debug!(
            verb = %invocation.verb,
            args = ?invocation.args,
            dry_run = self.config.dry_run,
            "git command"
        );

        if self.config.dry_run {
            return Ok(String::new());
        }

        if self
            .config
            .confirm_policy
            .requires_confirmation(&invocation.verb)
            && !self.prompter.confirm(&self.confirm_prompt, true)?
        {
            return Err(Error::UserAborted(format!("declined `{invocation}`")));
        }

        let stdio = if invocation.interactive {
            StdioMode::Interactive
        } else if capture_output {
            StdioMode::Capture
        } else {
            StdioMode::Passthrough
        };

        let output = self
            .runner
            .run(&self.program, &self.workdir, &invocation.argv(), stdio)
            .map_err(|source| Error::ToolSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.success {
            debug!(verb = %invocation.verb, stderr = %output.stderr.trim(), "git command failed");
            return Err(Error::ToolFailure {
                verb: invocation.verb.clone(),
                args: invocation.args.clone(),
                stderr: output.stderr,
                stdout: output.stdout,
                code: output.code,
            });
        }

        Ok(if capture_output {
            output.stdout
        } else {
            String::new()
        })
    }
}
