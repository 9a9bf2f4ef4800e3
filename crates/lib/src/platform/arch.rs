use std::fmt;
use std::str::FromStr;

/// Target architectures understood by the package manager triplets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Arch {
  #[default]
  X64,
  X86,
  Arm,
  Arm64,
}

impl Arch {
  pub const ALL: [Arch; 4] = [Arch::X64, Arch::X86, Arch::Arm, Arch::Arm64];

  /// Returns the lowercase string identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X64 => "x64",
      Self::X86 => "x86",
      Self::Arm => "arm",
      Self::Arm64 => "arm64",
    }
  }

  pub fn is_arm(&self) -> bool {
    matches!(self, Self::Arm | Self::Arm64)
  }
}

impl FromStr for Arch {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Arch::ALL
      .into_iter()
      .find(|arch| arch.as_str() == s.trim().to_lowercase())
      .ok_or(())
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
