use std::path::PathBuf;

use crate::platform::AGENT_OS_ENV;

pub const BUILD_CONFIGURATION_ENV: &str = "BUILD_CONFIGURATION";
pub const BUILD_ARCHITECTURE_ENV: &str = "BUILD_ARCHITECTURE";
pub const BUILD_VCPKGDIR_ENV: &str = "BUILD_VCPKGDIR";

/// Snapshot of the environment variables consulted during resolution.
///
/// Each value is only a fallback for the matching command-line flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
  pub agent_os: Option<String>,
  pub configuration: Option<String>,
  pub architecture: Option<String>,
  pub vcpkg_root: Option<PathBuf>,
}

impl BuildEnv {
  /// Read the fallbacks from the current process environment.
  ///
  /// Unset and empty variables are both treated as absent.
  pub fn from_process() -> Self {
    Self {
      agent_os: var(AGENT_OS_ENV),
      configuration: var(BUILD_CONFIGURATION_ENV),
      architecture: var(BUILD_ARCHITECTURE_ENV),
      vcpkg_root: var(BUILD_VCPKGDIR_ENV).map(PathBuf::from),
    }
  }
}

fn var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
