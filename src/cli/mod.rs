//! Command-line interface

mod context;
mod merge;
pub mod style;

use anstream::println;
use clap::{Parser, ValueEnum};
use dialoguer::{Confirm, FuzzySelect};
use gimer::error::{Error, Result};
use gimer::git::{ProgressCallback, Prompter};
use gimer::types::{CommandInvocation, ConfirmPolicy};
use merge::{MergeOptions, run_merge};
use style::Stylize;

/// Merge one branch into another in a cached clone of a remote repository
#[derive(Parser, Debug)]
#[command(name = "gimer", version)]
pub struct Cli {
    /// Repository URL, or a GitHub pull request / GitLab merge request URL
    pub repository: String,

    /// Branch to merge from (asked interactively when omitted)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Branch to merge into (asked interactively when omitted)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Print the git commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Delete the cached working copy when the session ends
    #[arg(long)]
    pub cleanup: bool,

    /// Ask before running commands
    #[arg(long, value_enum, conflicts_with = "no_confirm")]
    pub confirm: Option<ConfirmArg>,

    /// Never ask before running commands, overriding the settings file
    #[arg(long)]
    pub no_confirm: bool,

    /// Remote to fetch from and push to
    #[arg(long)]
    pub remote: Option<String>,

    /// Show debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

/// `--confirm` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfirmArg {
    /// Only commands that change the remote (push)
    Origin,
    /// Every command
    All,
}

impl From<ConfirmArg> for ConfirmPolicy {
    fn from(arg: ConfirmArg) -> Self {
        match arg {
            ConfirmArg::Origin => Self::Origin,
            ConfirmArg::All => Self::All,
        }
    }
}

impl Cli {
    /// Policy requested on the command line, if any
    fn confirm_policy(&self) -> Option<ConfirmPolicy> {
        if self.no_confirm {
            Some(ConfirmPolicy::None)
        } else {
            self.confirm.map(Into::into)
        }
    }
}

/// Run the CLI
pub async fn run(cli: Cli) -> Result<()> {
    let options = MergeOptions {
        confirm_policy: cli.confirm_policy(),
        source: cli.source,
        target: cli.target,
        dry_run: cli.dry_run,
        cleanup: cli.cleanup,
        remote: cli.remote,
    };
    run_merge(&cli.repository, options).await
}

/// Prints the command trace and status messages
pub struct CliProgress;

impl ProgressCallback for CliProgress {
    fn on_command(&self, invocation: &CommandInvocation, dry_run: bool) {
        let line = format!("≫ {invocation}");
        if dry_run {
            println!("{} {}", line.command(), "(dry run)".muted());
        } else {
            println!("{}", line.command());
        }
    }

    fn on_message(&self, message: &str) {
        println!("{}", message.emphasis());
    }
}

/// Terminal prompts backed by dialoguer
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, choices: &[String]) -> Result<String> {
        let selection = FuzzySelect::new()
            .with_prompt(prompt)
            .items(choices)
            .default(0)
            .interact_opt()
            .map_err(|e| Error::Internal(format!("Failed to read selection: {e}")))?;

        selection
            .and_then(|index| choices.get(index).cloned())
            .ok_or_else(|| Error::UserAborted("no branch selected".to_string()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?;
        // Escape counts as "no".
        Ok(answer.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_confirm_flags() {
        let cli = Cli::parse_from(["gimer", "https://github.com/o/r", "--confirm", "origin"]);
        assert_eq!(cli.confirm_policy(), Some(ConfirmPolicy::Origin));

        let cli = Cli::parse_from(["gimer", "https://github.com/o/r", "--no-confirm"]);
        assert_eq!(cli.confirm_policy(), Some(ConfirmPolicy::None));

        let cli = Cli::parse_from(["gimer", "https://github.com/o/r"]);
        assert_eq!(cli.confirm_policy(), None);
    }

    #[test]
    fn test_confirm_conflicts_with_no_confirm() {
        let result = Cli::try_parse_from([
            "gimer",
            "https://github.com/o/r",
            "--confirm",
            "all",
            "--no-confirm",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_branch_flags() {
        let cli = Cli::parse_from([
            "gimer",
            "git@github.com:o/r.git",
            "-s",
            "feature",
            "--target",
            "main",
            "--dry-run",
        ]);
        assert_eq!(cli.source.as_deref(), Some("feature"));
        assert_eq!(cli.target.as_deref(), Some("main"));
        assert!(cli.dry_run);
    }
}
