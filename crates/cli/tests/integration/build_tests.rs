use predicates::prelude::*;

use super::common::{TestEnv, split_logged};

#[test]
fn sdk_release_generates_then_builds() {
  let env = TestEnv::new();

  env
    .dobuild()
    .args(["--project", "sdk", "--config", "release"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Build Complete"))
    .stdout(predicate::str::contains("Time to generate"))
    .stdout(predicate::str::contains("Time to build"))
    .stdout(predicate::str::contains("Time to clean").not());

  let build_path = env.build_path("sdk", "linux-release");
  let logged = env.logged();
  assert_eq!(logged.len(), 2, "expected generate and build: {:?}", logged);

  let (cwd, generate) = split_logged(&logged[0]);
  assert_eq!(cwd, build_path, "generate runs inside the build directory");
  assert!(generate.starts_with(&format!("{} -G Ninja", env.source_dir().display())));
  assert!(generate.contains("-DCMAKE_BUILD_TYPE=Release"));
  assert!(generate.contains("-DDO_INCLUDE_SDK=TRUE"));
  assert!(generate.contains("-DDO_BUILD_TIMESTAMP="));

  let (_, build) = split_logged(&logged[1]);
  assert_eq!(build, format!("--build {} --target all", build_path.display()));
}

#[test]
fn start_banner_describes_the_build() {
  let env = TestEnv::new();

  env
    .dobuild()
    .args(["--project", "Agent", "--config", "devdebug", "--cmaketarget", "deliveryoptimization-agent"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Starting Build for project: agent"))
    .stdout(predicate::str::contains("Linux"))
    .stdout(predicate::str::contains("linux-devdebug"))
    .stdout(predicate::str::contains("deliveryoptimization-agent"))
    .stdout(predicate::str::contains("Ninja"));

  let (_, generate) = split_logged(&env.logged()[0]);
  assert!(generate.contains("-DCMAKE_BUILD_TYPE=Debug -DDO_DEV_DEBUG=ON"));
}

#[test]
fn generate_operation_runs_only_generate() {
  let env = TestEnv::new();

  env
    .dobuild()
    .args(["--project", "plugin-apt", "--operation", "generate", "--skip-tests"])
    .assert()
    .success();

  let logged = env.logged();
  assert_eq!(logged.len(), 1);
  let (_, generate) = split_logged(&logged[0]);
  assert!(generate.contains("-DDO_BUILD_TESTS=OFF"));
  assert!(generate.contains("-DDO_INCLUDE_PLUGINS=TRUE"));
}

#[test]
fn package_runs_cpack_in_build_directory() {
  let env = TestEnv::new();

  env
    .dobuild()
    .args(["--project", "agent", "--package-for", "deb", "--no-proxy-support"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Time to package"));

  let logged = env.logged();
  assert_eq!(logged.len(), 3, "{:?}", logged);
  let (_, generate) = split_logged(&logged[0]);
  assert!(generate.contains("-DDO_PACKAGE_TYPE=DEB"));
  assert!(generate.contains("-DDO_PROXY_SUPPORT=OFF"));
  assert_eq!(
    logged[2],
    format!("cpack|{}", env.build_path("agent", "linux-debug").display())
  );
}

#[test]
fn clean_with_cleanonly_cleans_once_and_runs_no_tools() {
  let env = TestEnv::new();
  let build_path = env.build_path("sdk", "linux-debug");
  std::fs::create_dir_all(&build_path).unwrap();
  std::fs::write(build_path.join("CMakeCache.txt"), "stale").unwrap();

  env
    .dobuild()
    .args(["--project", "sdk", "--clean", "--operation", "cleanonly"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Time to clean").count(1));

  assert!(!build_path.exists());
  assert!(env.logged().is_empty());
}

#[test]
fn configuration_falls_back_to_environment() {
  let env = TestEnv::new();

  env
    .dobuild()
    .env("BUILD_CONFIGURATION", "MinSizeRel")
    .args(["--project", "sdk", "--operation", "generate"])
    .assert()
    .success();

  let (cwd, generate) = split_logged(&env.logged()[0]);
  assert_eq!(cwd, env.build_path("sdk", "linux-minsizerel"));
  assert!(generate.contains("-DCMAKE_BUILD_TYPE=MinSizeRel"));
}

#[test]
fn verbose_tool_output_goes_to_stdout() {
  let env = TestEnv::new();

  env
    .dobuild()
    .args(["--project", "sdk", "--operation", "generate"])
    .assert()
    .success()
    .stdout(predicate::str::contains("FAKE-CMAKE-OUTPUT"))
    .stdout(predicate::str::contains("FAKE-CMAKE-WARNING"))
    .stderr(predicate::str::contains("FAKE-CMAKE-WARNING").not());
}

#[test]
fn quiet_discards_tool_output() {
  let env = TestEnv::new();

  env
    .dobuild()
    .args(["--project", "sdk", "--operation", "generate", "--quiet"])
    .assert()
    .success()
    .stdout(predicate::str::contains("FAKE-CMAKE-OUTPUT").not())
    .stderr(predicate::str::contains("FAKE-CMAKE-WARNING").not());

  assert_eq!(env.logged().len(), 1);
}

#[test]
fn json_output_reports_phases_and_timings() {
  let env = TestEnv::new();

  let output = env
    .dobuild()
    .args(["--project", "sdk", "-o", "json", "--quiet"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["project"], "sdk");
  assert_eq!(report["flavor"], "linux-debug");
  assert_eq!(report["phases"], serde_json::json!(["generate", "build"]));
  assert!(report["timings"]["generate"].is_u64());
  assert!(report["timings"]["build"].is_u64());
}

#[test]
fn json_output_stays_parseable_with_tool_output() {
  let env = TestEnv::new();

  let output = env
    .dobuild()
    .args(["--project", "sdk", "-o", "json"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["phases"], serde_json::json!(["generate", "build"]));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("FAKE-CMAKE-OUTPUT"));
  assert!(stderr.contains("FAKE-CMAKE-WARNING"));
}

#[test]
fn linux_build_ignores_environment_architecture() {
  let env = TestEnv::new();

  env
    .dobuild()
    .env("BUILD_ARCHITECTURE", "amd64")
    .args(["--project", "sdk"])
    .assert()
    .success();

  assert_eq!(env.logged().len(), 2);
}

#[test]
fn package_handles_quote_in_build_directory() {
  let env = TestEnv::new();
  let build_root = env.build_root().join("it's out");
  std::fs::create_dir_all(&build_root).unwrap();

  env
    .dobuild_into(&build_root)
    .args(["--project", "agent", "--package-for", "rpm"])
    .assert()
    .success();

  let logged = env.logged();
  assert_eq!(
    logged.last().unwrap(),
    &format!(
      "cpack|{}",
      build_root
        .join("build-deliveryoptimization-agent")
        .join("linux-debug")
        .display()
    )
  );
}
