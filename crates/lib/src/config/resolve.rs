use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::env::BuildEnv;
use super::types::{BuildConfiguration, Flavor, Operation, PackageType, SubprojectTable};
use super::{ConfigError, allowed_set};
use crate::compose::Composer;
use crate::platform::{Arch, Os, paths};

/// Format of the timestamp passed to the generator
pub const BUILD_TIMESTAMP_FORMAT: &str = "%Y%m%d.%H%M%S";

/// Target selected when none is requested
pub const DEFAULT_TARGET: &str = "all";

/// Raw, unvalidated build request as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
  pub project: String,
  pub operation: Option<String>,
  pub generator: Option<String>,
  pub config: Option<String>,
  pub cmake_target: Option<String>,
  pub package_for: Option<String>,
  pub arch: Option<String>,
  pub vcpkg_dir: Option<PathBuf>,
  pub build_directory: Option<PathBuf>,
  /// Absolute path of the CMake source tree.
  pub source_dir: PathBuf,
  pub clean: bool,
  pub static_analysis: bool,
  pub skip_tests: bool,
  pub no_proxy_support: bool,
}

/// Turns [`BuildArgs`] plus environment fallbacks into a [`BuildConfiguration`].
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
  subprojects: SubprojectTable,
}

impl ConfigResolver {
  pub fn new(subprojects: SubprojectTable) -> Self {
    Self { subprojects }
  }

  pub fn subprojects(&self) -> &SubprojectTable {
    &self.subprojects
  }

  /// Resolve using the current time as the build timestamp.
  pub fn resolve(&self, args: &BuildArgs, env: &BuildEnv, platform: Os) -> Result<BuildConfiguration, ConfigError> {
    self.resolve_at(args, env, platform, Utc::now())
  }

  /// Resolve with an explicit clock reading.
  ///
  /// Never touches the filesystem; paths are only joined.
  pub fn resolve_at(
    &self,
    args: &BuildArgs,
    env: &BuildEnv,
    platform: Os,
    now: DateTime<Utc>,
  ) -> Result<BuildConfiguration, ConfigError> {
    let (project, project_flag) =
      self
        .subprojects
        .lookup(&args.project)
        .ok_or_else(|| ConfigError::InvalidSubproject {
          name: args.project.clone(),
          allowed: allowed_set(self.subprojects.names()),
        })?;

    let flavor = resolve_flavor(args.config.as_deref().or(env.configuration.as_deref()))?;
    let operation = args.operation.as_deref().map(resolve_operation).transpose()?;

    check_platform_flags(args, platform)?;
    let package = args.package_for.as_deref().map(resolve_package).transpose()?;

    if args.no_proxy_support && project != "agent" {
      warn!(project = %project, "--no-proxy-support only affects the agent subproject");
    }

    // Only vcpkg triplets carry the architecture, and Linux builds have none
    let requested_arch = args.arch.as_deref().or(env.architecture.as_deref());
    let arch = if platform == Os::Linux {
      if let Some(value) = requested_arch {
        debug!(arch = %value, "architecture ignored on linux");
      }
      Arch::default()
    } else {
      resolve_arch(requested_arch, platform)?
    };

    let vcpkg_root = args.vcpkg_dir.clone().or_else(|| env.vcpkg_root.clone());
    if platform != Os::Linux && vcpkg_root.is_none() {
      return Err(ConfigError::MissingVcpkgRoot { platform });
    }

    let composer = Composer::for_platform(platform);
    let generator = match args.generator.as_deref() {
      Some(generator) if !generator.trim().is_empty() => generator.to_string(),
      _ => composer.generator_name().to_string(),
    };
    let target = composer.target_name(args.cmake_target.as_deref().unwrap_or(DEFAULT_TARGET));

    let config = BuildConfiguration {
      project: project.to_string(),
      project_flag: project_flag.to_string(),
      flavor,
      platform,
      arch,
      operation,
      generator,
      target,
      clean: args.clean,
      skip_tests: args.skip_tests,
      static_analysis: args.static_analysis,
      no_proxy_support: args.no_proxy_support,
      package,
      source_path: args.source_dir.clone(),
      build_root: args.build_directory.clone().unwrap_or_else(paths::default_build_root),
      vcpkg_root,
      build_timestamp: now.format(BUILD_TIMESTAMP_FORMAT).to_string(),
    };

    debug!(
      project = %config.project,
      flavor = %config.flavor,
      platform = %config.platform,
      generator = %config.generator,
      target = %config.target,
      "resolved build configuration"
    );

    Ok(config)
  }
}

fn resolve_flavor(value: Option<&str>) -> Result<Flavor, ConfigError> {
  match value {
    None => Ok(Flavor::Debug),
    Some(value) => value.parse().map_err(|_| ConfigError::InvalidConfiguration {
      value: value.to_string(),
      allowed: allowed_set(Flavor::ALL.iter().map(Flavor::as_str)),
    }),
  }
}

fn resolve_operation(value: &str) -> Result<Operation, ConfigError> {
  value.parse().map_err(|_| ConfigError::InvalidOperation {
    value: value.to_string(),
    allowed: allowed_set(Operation::ALL.iter().map(Operation::as_str)),
  })
}

fn resolve_package(value: &str) -> Result<PackageType, ConfigError> {
  value.parse().map_err(|_| ConfigError::InvalidPackageType {
    value: value.to_string(),
    allowed: allowed_set(PackageType::ACCEPTED),
  })
}

fn resolve_arch(value: Option<&str>, platform: Os) -> Result<Arch, ConfigError> {
  let arch = match value {
    None => Arch::default(),
    Some(value) => value.parse().map_err(|_| ConfigError::InvalidArchitecture {
      value: value.to_string(),
      allowed: allowed_set(Arch::ALL.iter().map(Arch::as_str)),
    })?,
  };
  if platform == Os::Windows && arch.is_arm() {
    return Err(ConfigError::UnsupportedArchitecture {
      arch: arch.to_string(),
      platform,
    });
  }
  Ok(arch)
}

/// Rejects flags that only exist in another platform's flag set.
fn check_platform_flags(args: &BuildArgs, platform: Os) -> Result<(), ConfigError> {
  if platform == Os::Linux {
    return Ok(());
  }
  if args.package_for.is_some() {
    return Err(ConfigError::UnsupportedFlag {
      flag: "--package-for",
      platform,
    });
  }
  if args.no_proxy_support {
    return Err(ConfigError::UnsupportedFlag {
      flag: "--no-proxy-support",
      platform,
    });
  }
  Ok(())
}
