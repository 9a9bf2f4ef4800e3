//! Top-level error for a build invocation.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::execute::ExecuteError;
use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Platform(#[from] PlatformError),

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Execute(#[from] ExecuteError),

  #[error("failed to remove build directory {path}")]
  Clean {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to create build directory {path}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to change working directory to {path}")]
  WorkingDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("build runner has already run")]
  AlreadyRan,
}

impl BuildError {
  /// Exit code of the external tool that caused this error, if any
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      BuildError::Execute(err) => err.exit_code(),
      _ => None,
    }
  }
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
