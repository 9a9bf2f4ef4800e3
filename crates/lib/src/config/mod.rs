//! Build configuration model and resolution.
//!
//! Command-line values win over environment fallbacks, which win over fixed
//! defaults. Everything is validated here so the runner never sees an
//! invalid combination.

mod env;
mod resolve;
mod types;

use thiserror::Error;

pub use env::{BUILD_ARCHITECTURE_ENV, BUILD_CONFIGURATION_ENV, BUILD_VCPKGDIR_ENV, BuildEnv};
pub use resolve::{BuildArgs, ConfigResolver};
pub use types::{BuildConfiguration, Flavor, Operation, PackageType, SubprojectTable};

use crate::platform::Os;

/// Validation failures raised before any command runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("project name '{name}' must be one of {allowed}")]
  InvalidSubproject { name: String, allowed: String },

  #[error("build configuration '{value}' is not supported; expected one of {allowed}")]
  InvalidConfiguration { value: String, allowed: String },

  #[error("invalid operation '{value}'; expected one of {allowed}")]
  InvalidOperation { value: String, allowed: String },

  #[error("'{value}' is not a supported package type; expected one of {allowed}")]
  InvalidPackageType { value: String, allowed: String },

  #[error("architecture '{value}' is not recognized; expected one of {allowed}")]
  InvalidArchitecture { value: String, allowed: String },

  #[error("{arch} builds are not supported on {platform}")]
  UnsupportedArchitecture { arch: String, platform: Os },

  #[error("{flag} is not available when building on {platform}")]
  UnsupportedFlag { flag: &'static str, platform: Os },

  #[error("a vcpkg root is required on {platform}; pass --vcpkgdir or set {var}", var = BUILD_VCPKGDIR_ENV)]
  MissingVcpkgRoot { platform: Os },
}

/// Formats an allowed-value set as `{a, b, c}`
pub(crate) fn allowed_set<I, S>(values: I) -> String
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let joined = values
    .into_iter()
    .map(|v| v.as_ref().to_string())
    .collect::<Vec<_>>()
    .join(", ");
  format!("{{{}}}", joined)
}
