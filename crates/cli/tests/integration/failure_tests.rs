use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn build_failure_propagates_exit_code_and_skips_packaging() {
  let env = TestEnv::new();

  env
    .dobuild()
    .env("FAKE_CMAKE_BUILD_EXIT", "3")
    .args(["--project", "agent", "--package-for", "rpm"])
    .assert()
    .code(3)
    .stdout(predicate::str::contains("Build Complete").not())
    .stderr(predicate::str::contains("command failed with exit code 3"));

  let logged = env.logged();
  assert_eq!(logged.len(), 2, "{:?}", logged);
  assert!(logged.iter().all(|line| !line.starts_with("cpack|")));
}

#[test]
fn bad_project_invokes_no_tools() {
  let env = TestEnv::new();

  env
    .dobuild()
    .args(["--project", "badname"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("{sdk, agent, plugin-apt}"));

  assert!(env.logged().is_empty());
}

#[test]
fn windows_rejects_linux_only_flags() {
  let env = TestEnv::new();

  env
    .dobuild()
    .env("AGENT_OS", "Windows_NT")
    .env("BUILD_VCPKGDIR", env.temp.path())
    .args(["--project", "agent", "--config", "debug", "--no-proxy-support"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--no-proxy-support is not available"));

  assert!(env.logged().is_empty());
}

#[test]
fn missing_tool_fails_run() {
  let env = TestEnv::new();
  std::fs::remove_file(env.bin_dir().join("cmake")).unwrap();

  env
    .dobuild()
    .env("PATH", env.bin_dir())
    .args(["--project", "sdk", "--operation", "build"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to start command"));
}
