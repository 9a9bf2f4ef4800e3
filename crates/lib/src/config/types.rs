//! Types describing a resolved build.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::platform::{Arch, Os, paths};

/// Build configuration flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
  Debug,
  DevDebug,
  Release,
  RelWithDebInfo,
  MinSizeRel,
}

impl Flavor {
  pub const ALL: [Flavor; 5] = [
    Flavor::Debug,
    Flavor::DevDebug,
    Flavor::Release,
    Flavor::RelWithDebInfo,
    Flavor::MinSizeRel,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "debug",
      Self::DevDebug => "devdebug",
      Self::Release => "release",
      Self::RelWithDebInfo => "relwithdebinfo",
      Self::MinSizeRel => "minsizerel",
    }
  }

  /// The `CMAKE_BUILD_TYPE` value for this flavor.
  ///
  /// `devdebug` is a debug build with developer-only code paths enabled,
  /// so it shares the `Debug` build type.
  pub fn build_type(&self) -> &'static str {
    match self {
      Self::Debug | Self::DevDebug => "Debug",
      Self::Release => "Release",
      Self::RelWithDebInfo => "RelWithDebInfo",
      Self::MinSizeRel => "MinSizeRel",
    }
  }

  pub fn is_dev_debug(&self) -> bool {
    matches!(self, Self::DevDebug)
  }
}

impl FromStr for Flavor {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim().to_lowercase();
    Flavor::ALL.into_iter().find(|f| f.as_str() == s).ok_or(())
  }
}

impl fmt::Display for Flavor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Explicitly requested single operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
  Generate,
  Build,
  CleanOnly,
}

impl Operation {
  pub const ALL: [Operation; 3] = [Operation::Generate, Operation::Build, Operation::CleanOnly];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Generate => "generate",
      Self::Build => "build",
      Self::CleanOnly => "cleanonly",
    }
  }
}

impl FromStr for Operation {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim().to_lowercase();
    Operation::ALL.into_iter().find(|op| op.as_str() == s).ok_or(())
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Installer package format produced by the packaging phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
  Deb,
  Rpm,
}

impl PackageType {
  /// Accepted spellings on the command line
  pub const ACCEPTED: [&'static str; 3] = ["deb", "debian", "rpm"];

  /// The `DO_PACKAGE_TYPE` value understood by the CMake project
  pub fn cmake_value(&self) -> &'static str {
    match self {
      Self::Deb => "DEB",
      Self::Rpm => "RPM",
    }
  }
}

impl FromStr for PackageType {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "deb" | "debian" => Ok(Self::Deb),
      "rpm" => Ok(Self::Rpm),
      _ => Err(()),
    }
  }
}

/// Static mapping from subproject name to the CMake flag that includes it.
///
/// Order is preserved so error messages list subprojects the way they are
/// declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubprojectTable {
  entries: Vec<(String, String)>,
}

impl SubprojectTable {
  pub fn new<I, K, V>(entries: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      entries: entries
        .into_iter()
        .map(|(name, flag)| (name.into().to_lowercase(), flag.into()))
        .collect(),
    }
  }

  /// Look up a subproject case-insensitively.
  ///
  /// Returns the canonical (lowercase) name and its generator flag.
  pub fn lookup(&self, name: &str) -> Option<(&str, &str)> {
    let name = name.trim().to_lowercase();
    self
      .entries
      .iter()
      .find(|(known, _)| *known == name)
      .map(|(known, flag)| (known.as_str(), flag.as_str()))
  }

  pub fn names(&self) -> Vec<&str> {
    self.entries.iter().map(|(name, _)| name.as_str()).collect()
  }
}

impl Default for SubprojectTable {
  fn default() -> Self {
    Self::new([
      ("sdk", "-DDO_INCLUDE_SDK=TRUE"),
      ("agent", "-DDO_INCLUDE_AGENT=TRUE"),
      ("plugin-apt", "-DDO_INCLUDE_PLUGINS=TRUE"),
    ])
  }
}

/// A fully resolved, validated build.
///
/// Constructed once by [`ConfigResolver`](super::ConfigResolver) and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfiguration {
  pub project: String,
  /// Generator flag selecting `project`, taken from the subproject table.
  pub project_flag: String,
  pub flavor: Flavor,
  #[serde(serialize_with = "serialize_display")]
  pub platform: Os,
  #[serde(serialize_with = "serialize_display")]
  pub arch: Arch,
  pub operation: Option<Operation>,
  pub generator: String,
  pub target: String,
  pub clean: bool,
  pub skip_tests: bool,
  pub static_analysis: bool,
  pub no_proxy_support: bool,
  pub package: Option<PackageType>,
  pub source_path: PathBuf,
  pub build_root: PathBuf,
  pub vcpkg_root: Option<PathBuf>,
  /// UTC timestamp (`%Y%m%d.%H%M%S`) shared by every command of the run.
  pub build_timestamp: String,
}

impl BuildConfiguration {
  /// The `{platform}-{config}` label, e.g. `linux-debug`
  pub fn flavor_label(&self) -> String {
    format!("{}-{}", self.platform, self.flavor)
  }

  /// Directory the generator writes into
  pub fn build_path(&self) -> PathBuf {
    paths::build_path(&self.build_root, &self.project, &self.flavor_label())
  }
}

fn serialize_display<T: fmt::Display, S: serde::Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.collect_str(value)
}
