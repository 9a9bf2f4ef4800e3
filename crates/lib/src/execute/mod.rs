//! External command execution.
//!
//! The runner only talks to the [`Executor`] trait, so phases can be driven
//! against a recording fake in tests and real processes in the binary.

mod process;
mod types;

pub use process::{ProcessExecutor, ToolOutput};
pub use types::{CommandLine, ExecuteError};

/// Runs one external command to completion.
pub trait Executor {
  /// Fails with [`ExecuteError::CmdFailed`] on a nonzero exit.
  fn execute(&self, command: &CommandLine) -> Result<(), ExecuteError>;
}

impl<E: Executor + ?Sized> Executor for &E {
  fn execute(&self, command: &CommandLine) -> Result<(), ExecuteError> {
    (**self).execute(command)
  }
}
