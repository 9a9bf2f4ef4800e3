//! Implementation of a `dobuild` invocation.
//!
//! Resolves the request against the environment, prints the start banner,
//! runs the planned phases and reports per-phase timings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use dobuild_lib::execute::{ProcessExecutor, ToolOutput};
use dobuild_lib::platform;
use dobuild_lib::{BuildArgs, BuildEnv, BuildRunner, ConfigResolver};

use crate::output::{OutputFormat, print_banner, print_json, print_phase_times, print_success};

#[derive(Debug, Args)]
pub struct BuildOpts {
  /// The cmake subproject to build: sdk, agent or plugin-apt
  #[arg(long)]
  pub project: String,

  /// The operation to perform: generate, build or cleanonly (default: generate + build)
  #[arg(long)]
  pub operation: Option<String>,

  /// The CMake generator to use, e.g. Ninja or "Unix Makefiles"
  #[arg(long)]
  pub generator: Option<String>,

  /// The target configuration: debug, devdebug, release, relwithdebinfo or minsizerel
  #[arg(long)]
  pub config: Option<String>,

  /// The cmake target within the subproject, e.g. deliveryoptimization-sdk-tests
  #[arg(long = "cmaketarget")]
  pub cmake_target: Option<String>,

  /// Package type to produce after building: deb or rpm (Linux only)
  #[arg(long)]
  pub package_for: Option<String>,

  /// Target architecture for vcpkg triplets (default: x64)
  #[arg(long)]
  pub arch: Option<String>,

  /// Root of the vcpkg checkout (Windows and macOS)
  #[arg(long)]
  pub vcpkgdir: Option<PathBuf>,

  /// Override the default build output root (the system temp directory)
  #[arg(long)]
  pub build_directory: Option<PathBuf>,

  /// CMake source tree (default: current directory)
  #[arg(long)]
  pub source_dir: Option<PathBuf>,

  /// Remove built binaries before re-building them
  #[arg(long)]
  pub clean: bool,

  /// Run static analysis tools (cpplint)
  #[arg(long)]
  pub static_analysis: bool,

  /// Skip adding and building test code
  #[arg(long)]
  pub skip_tests: bool,

  /// Build the agent without proxy handling (Linux only)
  #[arg(long)]
  pub no_proxy_support: bool,

  /// Discard output of the invoked tools
  #[arg(short, long)]
  pub quiet: bool,
}

impl BuildOpts {
  fn into_args(self, source_dir: PathBuf) -> BuildArgs {
    BuildArgs {
      project: self.project,
      operation: self.operation,
      generator: self.generator,
      config: self.config,
      cmake_target: self.cmake_target,
      package_for: self.package_for,
      arch: self.arch,
      vcpkg_dir: self.vcpkgdir,
      build_directory: self.build_directory,
      source_dir,
      clean: self.clean,
      static_analysis: self.static_analysis,
      skip_tests: self.skip_tests,
      no_proxy_support: self.no_proxy_support,
    }
  }
}

pub fn cmd_build(opts: BuildOpts, output: OutputFormat) -> Result<()> {
  let env = BuildEnv::from_process();
  let platform = platform::detect(env.agent_os.as_deref())?;

  let source_dir = match &opts.source_dir {
    Some(dir) => dir.clone(),
    None => std::env::current_dir().context("Failed to read current directory")?,
  };
  // Generation runs from inside the build directory, so the source must be absolute
  let source_dir = dunce::canonicalize(&source_dir)
    .with_context(|| format!("Source directory not found: {}", source_dir.display()))?;

  // stdout is reserved for the report in JSON mode
  let tool_output = if opts.quiet {
    ToolOutput::Discard
  } else if output.is_json() {
    ToolOutput::Stderr
  } else {
    ToolOutput::Stdout
  };
  debug!(source = %source_dir.display(), output = ?tool_output, "preparing build");
  let executor = ProcessExecutor::new(tool_output);
  let args = opts.into_args(source_dir);
  let config = ConfigResolver::default().resolve(&args, &env, platform)?;

  if !output.is_json() {
    print_banner(&config);
  }

  let mut runner = BuildRunner::new(config, executor);
  let report = match runner.run() {
    Ok(report) => report,
    Err(err) => {
      if !output.is_json() {
        print_phase_times(runner.timings());
      }
      return Err(err.into());
    }
  };

  if output.is_json() {
    print_json(&report)?;
  } else {
    println!();
    print_success("Build Complete");
    print_phase_times(&report.timings);
  }

  Ok(())
}
