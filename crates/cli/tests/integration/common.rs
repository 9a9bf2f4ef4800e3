//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Fake `cmake`: logs `<cwd>|<args>` and can be told to fail the build step.
const FAKE_CMAKE: &str = r#"#!/bin/sh
echo "$(pwd)|$*" >> "$DOBUILD_TEST_LOG"
echo "FAKE-CMAKE-OUTPUT"
echo "FAKE-CMAKE-WARNING" >&2
if [ "$1" = "--build" ] && [ -n "$FAKE_CMAKE_BUILD_EXIT" ]; then
  exit "$FAKE_CMAKE_BUILD_EXIT"
fi
exit 0
"#;

/// Fake `cpack`: logs `cpack|<cwd>`.
const FAKE_CPACK: &str = r#"#!/bin/sh
echo "cpack|$(pwd)" >> "$DOBUILD_TEST_LOG"
exit 0
"#;

/// Isolated test environment.
///
/// Each test gets its own source tree, build root, fake tool directory and
/// command log.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    std::fs::create_dir_all(temp.path().join("out")).unwrap();
    let env = Self { temp };
    env.install_tool("cmake", FAKE_CMAKE);
    env.install_tool("cpack", FAKE_CPACK);
    env
  }

  fn install_tool(&self, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let bin = self.bin_dir();
    std::fs::create_dir_all(&bin).unwrap();
    let path = bin.join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.temp.path().join("bin")
  }

  pub fn source_dir(&self) -> PathBuf {
    self.root().join("src")
  }

  pub fn build_root(&self) -> PathBuf {
    self.root().join("out")
  }

  pub fn log_path(&self) -> PathBuf {
    self.temp.path().join("commands.log")
  }

  /// Expected build-output directory for a project and `{platform}-{config}` flavor
  pub fn build_path(&self, project: &str, flavor: &str) -> PathBuf {
    self
      .build_root()
      .join(format!("build-deliveryoptimization-{}", project))
      .join(flavor)
  }

  /// Logged tool invocations, one per line
  pub fn logged(&self) -> Vec<String> {
    match std::fs::read_to_string(self.log_path()) {
      Ok(content) => content.lines().map(str::to_string).collect(),
      Err(_) => Vec::new(),
    }
  }

  /// `dobuild` with fake tools first on PATH and a Linux-classified host.
  pub fn dobuild(&self) -> Command {
    self.dobuild_into(&self.build_root())
  }

  /// Like [`TestEnv::dobuild`], with a different build root
  pub fn dobuild_into(&self, build_root: &Path) -> Command {
    let path = std::env::var_os("PATH").unwrap_or_default();
    let mut paths = vec![self.bin_dir()];
    paths.extend(std::env::split_paths(&path));

    let mut cmd = cargo_bin_cmd!("dobuild");
    cmd
      .env("PATH", std::env::join_paths(paths).unwrap())
      .env("AGENT_OS", "Linux")
      .env("DOBUILD_TEST_LOG", self.log_path())
      .env_remove("BUILD_CONFIGURATION")
      .env_remove("BUILD_ARCHITECTURE")
      .env_remove("BUILD_VCPKGDIR")
      .env_remove("FAKE_CMAKE_BUILD_EXIT")
      .arg("--source-dir")
      .arg(self.source_dir())
      .arg("--build-directory")
      .arg(build_root);
    cmd
  }
}

/// Splits a logged cmake line into its working directory and arguments
pub fn split_logged(line: &str) -> (PathBuf, String) {
  let (cwd, args) = line.split_once('|').unwrap();
  (Path::new(cwd).to_path_buf(), args.to_string())
}
