//! Running external tools as child processes.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use super::Executor;
use super::types::{CommandLine, ExecuteError};

/// Where a child's output goes.
///
/// Both merged modes put the child's two streams on one of ours, so tools
/// that print warnings on stderr don't look like failures to a CI log scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolOutput {
  /// stdout and stderr both go to our stdout
  #[default]
  Stdout,
  /// stdout and stderr both go to our stderr, leaving stdout for a report
  Stderr,
  /// both streams are discarded
  Discard,
}

/// Runs commands as blocking child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor {
  output: ToolOutput,
}

impl ProcessExecutor {
  pub fn new(output: ToolOutput) -> Self {
    Self { output }
  }

  pub fn output(&self) -> ToolOutput {
    self.output
  }
}

impl Executor for ProcessExecutor {
  fn execute(&self, command: &CommandLine) -> Result<(), ExecuteError> {
    let cmd = command.to_string();
    info!(cmd = %cmd, "running command");

    let mut process = Command::new(&command.program);
    process.args(&command.args);

    let redirect = |source| ExecuteError::Redirect { cmd: cmd.clone(), source };
    match self.output {
      ToolOutput::Stdout => {
        // Keep our own buffered output ahead of the child's
        if let Err(err) = io::stdout().flush() {
          debug!(error = %err, "failed to flush stdout before spawning");
        }
        process.stdout(Stdio::inherit()).stderr(stdout_as_stdio().map_err(redirect)?);
      }
      ToolOutput::Stderr => {
        process.stdout(stderr_as_stdio().map_err(redirect)?).stderr(Stdio::inherit());
      }
      ToolOutput::Discard => {
        process.stdout(Stdio::null()).stderr(Stdio::null());
      }
    }

    debug!(program = %command.program, output = ?self.output, "spawning process");

    let status = process.status().map_err(|source| ExecuteError::Spawn {
      cmd: cmd.clone(),
      source,
    })?;

    if !status.success() {
      warn!(cmd = %cmd, code = ?status.code(), "command failed");
      return Err(ExecuteError::CmdFailed {
        cmd,
        code: status.code(),
      });
    }

    Ok(())
  }
}

/// Duplicates of our standard streams usable as a child's stream.
#[cfg(unix)]
fn stdout_as_stdio() -> io::Result<Stdio> {
  use std::os::fd::AsFd;
  Ok(Stdio::from(io::stdout().as_fd().try_clone_to_owned()?))
}

#[cfg(unix)]
fn stderr_as_stdio() -> io::Result<Stdio> {
  use std::os::fd::AsFd;
  Ok(Stdio::from(io::stderr().as_fd().try_clone_to_owned()?))
}

#[cfg(windows)]
fn stdout_as_stdio() -> io::Result<Stdio> {
  use std::os::windows::io::AsHandle;
  Ok(Stdio::from(io::stdout().as_handle().try_clone_to_owned()?))
}

#[cfg(windows)]
fn stderr_as_stdio() -> io::Result<Stdio> {
  use std::os::windows::io::AsHandle;
  Ok(Stdio::from(io::stderr().as_handle().try_clone_to_owned()?))
}
