//! Filesystem locations derived from a build configuration.
//!
//! These are pure path joins; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

/// Prefix of the per-project directory under the build root
pub const BUILD_DIR_PREFIX: &str = "build-deliveryoptimization-";

/// Returns the build-output directory for a project and flavor.
///
/// Layout: `{build_root}/build-deliveryoptimization-{project}/{flavor}`
/// where `flavor` is the `{platform}-{config}` label.
pub fn build_path(build_root: &Path, project: &str, flavor: &str) -> PathBuf {
  build_root.join(format!("{}{}", BUILD_DIR_PREFIX, project)).join(flavor)
}

/// Returns the default build root (the system temp directory)
pub fn default_build_root() -> PathBuf {
  std::env::temp_dir()
}

/// Returns the vcpkg CMake toolchain file under a vcpkg root
pub fn vcpkg_toolchain_file(vcpkg_root: &Path) -> PathBuf {
  vcpkg_root.join("scripts").join("buildsystems").join("vcpkg.cmake")
}
