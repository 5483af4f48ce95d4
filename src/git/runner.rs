//! Subprocess runner backed by `std::process`

use super::{CommandRunner, ToolOutput};
use crate::types::StdioMode;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs the tool as a child process of gimer
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        cwd: &Path,
        args: &[String],
        stdio: StdioMode,
    ) -> std::io::Result<ToolOutput> {
        let mut command = Command::new(program);
        command.args(args).current_dir(cwd).stdin(Stdio::inherit());

        match stdio {
            StdioMode::Capture => {
                command.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
            StdioMode::Passthrough => {
                command.stdout(Stdio::inherit()).stderr(Stdio::piped());
            }
            StdioMode::Interactive => {
                command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
        }

        let output = command.output()?;
        debug!(program, status = %output.status, "process exited");

        Ok(ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}
