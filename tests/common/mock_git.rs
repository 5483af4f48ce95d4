//! Scripted stand-ins for git and the terminal
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use gimer::error::{Error, Result};
use gimer::git::{CommandRunner, ProgressCallback, Prompter, ToolOutput};
use gimer::types::{CommandInvocation, StdioMode};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded git invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCall {
    pub argv: Vec<String>,
    pub cwd: PathBuf,
    pub stdio: StdioMode,
}

impl GitCall {
    /// Arguments joined with spaces, e.g. `pull origin main`
    pub fn line(&self) -> String {
        self.argv.join(" ")
    }
}

/// Fake git binary
///
/// Responses are queued per verb; a verb with nothing queued succeeds with
/// empty output. A successful `clone` creates `.git` in the working
/// directory like the real tool would.
#[derive(Default)]
pub struct MockGit {
    responses: Mutex<HashMap<String, VecDeque<ToolOutput>>>,
    calls: Mutex<Vec<GitCall>>,
}

impl MockGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the output of the next `verb` call
    pub fn respond(&self, verb: &str, output: ToolOutput) {
        self.responses
            .lock()
            .unwrap()
            .entry(verb.to_string())
            .or_default()
            .push_back(output);
    }

    /// Queue successful stdout for the next `verb` call
    pub fn stdout(&self, verb: &str, stdout: &str) {
        self.respond(verb, ToolOutput::ok(stdout));
    }

    /// Make the next `verb` call exit non-zero with `stderr`
    pub fn fail(&self, verb: &str, stderr: &str) {
        self.respond(verb, ToolOutput::failed(stderr));
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Every invocation as a command line without the program name
    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(GitCall::line).collect()
    }

    pub fn verbs(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.argv.first().cloned())
            .collect()
    }

    pub fn ran(&self, verb: &str) -> bool {
        self.verbs().iter().any(|v| v == verb)
    }

    /// Position of the first call with `line`
    pub fn position(&self, line: &str) -> Option<usize> {
        self.lines().iter().position(|l| l == line)
    }
}

impl CommandRunner for MockGit {
    fn run(
        &self,
        _program: &str,
        cwd: &Path,
        args: &[String],
        stdio: StdioMode,
    ) -> std::io::Result<ToolOutput> {
        self.calls.lock().unwrap().push(GitCall {
            argv: args.to_vec(),
            cwd: cwd.to_path_buf(),
            stdio,
        });

        let verb = args.first().cloned().unwrap_or_default();
        let output = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&verb)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| ToolOutput::ok(""));

        if verb == "clone" && output.success {
            std::fs::create_dir_all(cwd.join(".git"))?;
        }
        Ok(output)
    }
}

/// Prompter answering from queues and recording every question
#[derive(Default)]
pub struct ScriptedPrompter {
    selections: Mutex<VecDeque<String>>,
    confirmations: Mutex<VecDeque<bool>>,
    select_calls: Mutex<Vec<(String, Vec<String>)>>,
    confirm_calls: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_answers(&self, answers: &[&str]) {
        self.selections
            .lock()
            .unwrap()
            .extend(answers.iter().map(ToString::to_string));
    }

    pub fn confirm_answers(&self, answers: &[bool]) {
        self.confirmations.lock().unwrap().extend(answers);
    }

    /// `(prompt, choices)` of every selection
    pub fn select_calls(&self) -> Vec<(String, Vec<String>)> {
        self.select_calls.lock().unwrap().clone()
    }

    /// Prompts of every yes/no question
    pub fn confirm_calls(&self) -> Vec<String> {
        self.confirm_calls.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, choices: &[String]) -> Result<String> {
        self.select_calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), choices.to_vec()));
        self.selections
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Internal(format!("unexpected selection: {prompt}")))
    }

    /// Unscripted questions get their default answer
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        self.confirm_calls.lock().unwrap().push(prompt.to_string());
        Ok(self
            .confirmations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(default))
    }
}

/// Collects the command trace and status messages
#[derive(Default)]
pub struct RecordingProgress {
    commands: Mutex<Vec<(String, bool)>>,
    messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    /// Traced command lines, e.g. `git fetch origin`
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(|(line, _)| line.clone())
            .collect()
    }

    /// Whether every traced command was flagged as a dry run
    pub fn all_dry_run(&self) -> bool {
        self.commands.lock().unwrap().iter().all(|(_, dry)| *dry)
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressCallback for RecordingProgress {
    fn on_command(&self, invocation: &CommandInvocation, dry_run: bool) {
        self.commands
            .lock()
            .unwrap()
            .push((invocation.to_string(), dry_run));
    }

    fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
