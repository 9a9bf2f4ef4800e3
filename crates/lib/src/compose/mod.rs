//! Per-platform generator and builder arguments.
//!
//! Every platform starts from the same base generate list and appends its
//! own definitions. Windows and macOS go through the vcpkg toolchain; Linux
//! uses the native toolchain directly.

use crate::config::{BuildConfiguration, PackageType};
use crate::platform::{Os, paths};

pub const DEV_DEBUG_DEFINE: &str = "-DDO_DEV_DEBUG=ON";
pub const SKIP_TESTS_DEFINE: &str = "-DDO_BUILD_TESTS=OFF";
pub const STATIC_ANALYSIS_DEFINE: &str = "-DCMAKE_CXX_CPPLINT=cpplint";
pub const NO_PROXY_SUPPORT_DEFINE: &str = "-DDO_PROXY_SUPPORT=OFF";

/// Option composer for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composer {
  Linux,
  Windows,
  MacOs,
}

impl Composer {
  pub fn for_platform(platform: Os) -> Self {
    match platform {
      Os::Linux => Self::Linux,
      Os::Windows => Self::Windows,
      Os::MacOs => Self::MacOs,
    }
  }

  /// Generator used when none is requested
  pub fn generator_name(&self) -> &'static str {
    match self {
      Self::Linux => "Ninja",
      // The VS generator targets the host architecture by default
      Self::Windows => "Visual Studio 16 2019",
      Self::MacOs => "ninja",
    }
  }

  /// Maps a requested target onto the name the generator actually emits.
  ///
  /// Visual Studio names the aggregate project `ALL_BUILD`.
  pub fn target_name(&self, requested: &str) -> String {
    match self {
      Self::Windows if requested == "all" => "ALL_BUILD".to_string(),
      _ => requested.to_string(),
    }
  }

  /// Options following `<tool> <source-path>` in the generate command
  pub fn generate_options(&self, config: &BuildConfiguration) -> Vec<String> {
    let base = base_generate_options(config);
    let extra = match self {
      Self::Linux => linux_generate_options(config),
      Self::Windows | Self::MacOs => vcpkg_generate_options(config),
    };
    [base, extra].concat()
  }

  /// Options following `<tool> --build <build-path>` in the build command
  pub fn build_options(&self, config: &BuildConfiguration) -> Vec<String> {
    let base = vec!["--target".to_string(), config.target.clone()];
    let extra = match self {
      Self::Linux => Vec::new(),
      // Multi-config generators pick the configuration at build time
      Self::Windows | Self::MacOs => vec!["--config".to_string(), config.flavor.build_type().to_string()],
    };
    [base, extra].concat()
  }
}

fn base_generate_options(config: &BuildConfiguration) -> Vec<String> {
  let mut options = vec![
    "-G".to_string(),
    config.generator.clone(),
    format!("-DCMAKE_BUILD_TYPE={}", config.flavor.build_type()),
  ];

  if config.flavor.is_dev_debug() {
    options.push(DEV_DEBUG_DEFINE.to_string());
  }

  options.push(format!("-DDO_BUILD_TIMESTAMP={}", config.build_timestamp));

  if config.skip_tests {
    options.push(SKIP_TESTS_DEFINE.to_string());
  }

  options.push(config.project_flag.clone());

  if config.static_analysis {
    options.push(STATIC_ANALYSIS_DEFINE.to_string());
  }

  options
}

fn linux_generate_options(config: &BuildConfiguration) -> Vec<String> {
  let mut options = Vec::new();

  if let Some(package) = config.package {
    options.push(package_define(package));
  }

  if config.no_proxy_support {
    options.push(NO_PROXY_SUPPORT_DEFINE.to_string());
  }

  options
}

fn vcpkg_generate_options(config: &BuildConfiguration) -> Vec<String> {
  let mut options = Vec::new();

  if let Some(root) = &config.vcpkg_root {
    options.push(format!(
      "-DCMAKE_TOOLCHAIN_FILE={}",
      paths::vcpkg_toolchain_file(root).display()
    ));
  }

  // No `-static` suffix: the dynamic triplets are what the vcpkg installs provide.
  options.push(format!("-DVCPKG_TARGET_TRIPLET={}-{}", config.arch, config.platform));

  options
}

fn package_define(package: PackageType) -> String {
  format!("-DDO_PACKAGE_TYPE={}", package.cmake_value())
}
