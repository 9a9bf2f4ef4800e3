use std::fmt;

/// Host platforms a build can be orchestrated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Classify an OS-name signal by prefix.
  ///
  /// The name is lowercased first, so `Linux`, `Windows_NT` and `Darwin`
  /// (the spellings CI agents report) all classify.
  pub fn classify(name: &str) -> Option<Self> {
    let name = name.trim().to_lowercase();
    if name.starts_with("linux") {
      Some(Self::Linux)
    } else if name.starts_with("win") {
      Some(Self::Windows)
    } else if name.starts_with("darwin") {
      Some(Self::MacOs)
    } else {
      None
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// Human-facing name used in the start banner
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::Linux => "Linux",
      Self::MacOs => "Darwin",
      Self::Windows => "Windows",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Returns the native OS name in the spelling [`Os::classify`] understands.
///
/// Rust reports `macos` and `windows`; build agents and most tooling report
/// `darwin` and `win32`.
pub fn native_os_name() -> &'static str {
  match std::env::consts::OS {
    "macos" => "darwin",
    "windows" => "win32",
    other => other,
  }
}
