//! Host platform probing.
//!
//! The platform is classified from an OS-name signal. A CI orchestrator can
//! force the classification through `AGENT_OS`; otherwise the native OS name
//! is used.

pub mod arch;
pub mod os;
pub mod paths;

use thiserror::Error;
use tracing::debug;

pub use arch::Arch;
pub use os::{Os, native_os_name};

/// Environment variable CI agents use to report the host OS
pub const AGENT_OS_ENV: &str = "AGENT_OS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
  #[error("target platform '{0}' is not supported or could not be deduced from the build environment")]
  Unsupported(String),
}

/// Detect the host platform.
///
/// `agent_os` is the orchestration override; when absent the native OS name
/// is classified instead.
pub fn detect(agent_os: Option<&str>) -> Result<Os, PlatformError> {
  let name = match agent_os {
    Some(name) if !name.trim().is_empty() => name,
    _ => native_os_name(),
  };
  debug!(os_name = %name, "classifying host platform");
  Os::classify(name).ok_or_else(|| PlatformError::Unsupported(name.to_lowercase()))
}
