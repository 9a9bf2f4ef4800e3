use std::fmt;

use serde::Serialize;

use crate::config::{BuildConfiguration, Operation};

/// One step of a build invocation.
///
/// Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
  Clean,
  Generate,
  Build,
  Package,
}

impl Phase {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Clean => "clean",
      Self::Generate => "generate",
      Self::Build => "build",
      Self::Package => "package",
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Ordered phases for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhasePlan {
  phases: Vec<Phase>,
}

impl PhasePlan {
  /// Derive the phase sequence.
  ///
  /// - `clean` always runs first, whatever the operation.
  /// - `cleanonly` adds a clean only when `clean` has not already.
  /// - No operation means generate then build.
  /// - Packaging follows a full or build-only sequence when `package` is set.
  pub fn new(operation: Option<Operation>, clean: bool, package: bool) -> Self {
    let mut phases = Vec::new();

    if clean {
      phases.push(Phase::Clean);
    }

    match operation {
      Some(Operation::Generate) => phases.push(Phase::Generate),
      Some(Operation::Build) => phases.push(Phase::Build),
      Some(Operation::CleanOnly) => {
        if !clean {
          phases.push(Phase::Clean);
        }
      }
      None => phases.extend([Phase::Generate, Phase::Build]),
    }

    if package && matches!(operation, None | Some(Operation::Build)) {
      phases.push(Phase::Package);
    }

    Self { phases }
  }

  pub fn for_config(config: &BuildConfiguration) -> Self {
    Self::new(config.operation, config.clean, config.package.is_some())
  }

  pub fn phases(&self) -> &[Phase] {
    &self.phases
  }

  pub fn contains(&self, phase: Phase) -> bool {
    self.phases.contains(&phase)
  }
}
