//! Types for running external commands.

use std::fmt;

use thiserror::Error;

/// Errors raised while running an external tool.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The tool ran and exited unsuccessfully.
  ///
  /// `code` is `None` when the process was terminated by a signal.
  #[error("command failed with exit code {}: {cmd}", display_code(.code))]
  CmdFailed { cmd: String, code: Option<i32> },

  /// The tool could not be started at all.
  #[error("failed to start command: {cmd}")]
  Spawn {
    cmd: String,
    #[source]
    source: std::io::Error,
  },

  /// Output redirection could not be set up.
  #[error("failed to redirect output for: {cmd}")]
  Redirect {
    cmd: String,
    #[source]
    source: std::io::Error,
  },
}

impl ExecuteError {
  /// Exit code of the failed tool, if it exited normally
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      ExecuteError::CmdFailed { code, .. } => *code,
      _ => None,
    }
  }
}

fn display_code(code: &Option<i32>) -> String {
  code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}

/// A program and its arguments, kept as separate tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
  pub program: String,
  pub args: Vec<String>,
}

impl CommandLine {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// All tokens, program first
  pub fn tokens(&self) -> Vec<&str> {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .collect()
  }
}

impl fmt::Display for CommandLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.tokens().join(" "))
  }
}
