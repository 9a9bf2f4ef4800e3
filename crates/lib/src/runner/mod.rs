//! Phase execution.
//!
//! A [`BuildRunner`] walks its [`PhasePlan`] in order, timing every phase and
//! stopping at the first failure. Nothing is retried.

mod plan;
mod timing;
mod workdir;

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tracing::{error, info};

pub use plan::{Phase, PhasePlan};
pub use timing::PhaseTimings;
pub use workdir::WorkingDirGuard;

use crate::compose::Composer;
use crate::config::BuildConfiguration;
use crate::error::{BuildError, Result};
use crate::execute::{CommandLine, Executor};

/// Generator and builder executable
pub const CMAKE_PROGRAM: &str = "cmake";

/// Shell used to run the packaging step
pub const PACKAGE_SHELL: &str = "/bin/bash";

/// Packaging script; the build path arrives as `$1`, never spliced into the script
pub const PACKAGE_SCRIPT: &str = r#"cd "$1" && cpack ."#;

/// Where a runner is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
  Idle,
  Running(Phase),
  Done,
  Failed(Phase),
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
  pub project: String,
  pub flavor: String,
  pub build_path: PathBuf,
  pub phases: PhasePlan,
  pub timings: PhaseTimings,
}

/// Drives one build invocation against an [`Executor`].
#[derive(Debug)]
pub struct BuildRunner<E: Executor> {
  config: BuildConfiguration,
  composer: Composer,
  plan: PhasePlan,
  executor: E,
  state: RunState,
  timings: PhaseTimings,
}

impl<E: Executor> BuildRunner<E> {
  pub fn new(config: BuildConfiguration, executor: E) -> Self {
    let composer = Composer::for_platform(config.platform);
    let plan = PhasePlan::for_config(&config);
    Self {
      config,
      composer,
      plan,
      executor,
      state: RunState::Idle,
      timings: PhaseTimings::default(),
    }
  }

  pub fn config(&self) -> &BuildConfiguration {
    &self.config
  }

  pub fn plan(&self) -> &PhasePlan {
    &self.plan
  }

  pub fn state(&self) -> RunState {
    self.state
  }

  /// Timings of the phases run so far, including a phase that failed
  pub fn timings(&self) -> &PhaseTimings {
    &self.timings
  }

  pub fn executor(&self) -> &E {
    &self.executor
  }

  /// `cmake <source> <generate options>`
  pub fn generate_command(&self) -> CommandLine {
    CommandLine::new(CMAKE_PROGRAM)
      .arg(self.config.source_path.to_string_lossy())
      .args(self.composer.generate_options(&self.config))
  }

  /// `cmake --build <build path> <build options>`
  pub fn build_command(&self) -> CommandLine {
    CommandLine::new(CMAKE_PROGRAM)
      .arg("--build")
      .arg(self.config.build_path().to_string_lossy())
      .args(self.composer.build_options(&self.config))
  }

  /// `cpack` run from inside the build directory
  pub fn package_command(&self) -> CommandLine {
    CommandLine::new(PACKAGE_SHELL).args([
      "-c".to_string(),
      PACKAGE_SCRIPT.to_string(),
      "dobuild".to_string(),
      self.config.build_path().to_string_lossy().into_owned(),
    ])
  }

  /// Run every planned phase in order.
  ///
  /// The first failing phase aborts the run and its error is returned as-is.
  /// A runner runs once; later calls fail with [`BuildError::AlreadyRan`].
  pub fn run(&mut self) -> Result<RunReport> {
    if self.state != RunState::Idle {
      return Err(BuildError::AlreadyRan);
    }

    let phases = self.plan.phases().to_vec();
    info!(
      project = %self.config.project,
      flavor = %self.config.flavor_label(),
      phases = ?phases,
      "starting build"
    );

    for phase in phases {
      self.state = RunState::Running(phase);
      info!(phase = %phase, "starting phase");

      let start = Instant::now();
      let result = self.run_phase(phase);
      self.timings.record(phase, start.elapsed());

      if let Err(err) = result {
        error!(phase = %phase, error = %err, "phase failed");
        self.state = RunState::Failed(phase);
        return Err(err);
      }
    }

    self.state = RunState::Done;
    info!(total = ?self.timings.total(), "build complete");

    Ok(RunReport {
      project: self.config.project.clone(),
      flavor: self.config.flavor_label(),
      build_path: self.config.build_path(),
      phases: self.plan.clone(),
      timings: self.timings.clone(),
    })
  }

  fn run_phase(&self, phase: Phase) -> Result<()> {
    match phase {
      Phase::Clean => self.clean(),
      Phase::Generate => self.generate(),
      Phase::Build => self.build(),
      Phase::Package => self.package(),
    }
  }

  fn clean(&self) -> Result<()> {
    let path = self.config.build_path();
    info!(path = %path.display(), "purging build directory");
    if path.exists() {
      std::fs::remove_dir_all(&path).map_err(|source| BuildError::Clean { path, source })?;
    }
    Ok(())
  }

  /// Not every CMake accepts `-S`/`-B`, so generation runs from inside the
  /// build directory.
  fn generate(&self) -> Result<()> {
    let path = self.config.build_path();
    std::fs::create_dir_all(&path).map_err(|source| BuildError::CreateDir {
      path: path.clone(),
      source,
    })?;

    let _cwd = WorkingDirGuard::enter(&path).map_err(|source| BuildError::WorkingDir {
      path: path.clone(),
      source,
    })?;
    self.executor.execute(&self.generate_command())?;
    Ok(())
  }

  fn build(&self) -> Result<()> {
    self.executor.execute(&self.build_command())?;
    Ok(())
  }

  fn package(&self) -> Result<()> {
    self.executor.execute(&self.package_command())?;
    Ok(())
  }
}
