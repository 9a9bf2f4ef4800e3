use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Changes the process working directory for as long as it is alive.
///
/// The previous directory is restored on drop, including when the scope is
/// left through an error. Not reentrant: the working directory is process
/// state, so only one guard should be live at a time.
#[derive(Debug)]
pub struct WorkingDirGuard {
  original: PathBuf,
}

impl WorkingDirGuard {
  pub fn enter(path: &Path) -> io::Result<Self> {
    let original = std::env::current_dir()?;
    std::env::set_current_dir(path)?;
    debug!(from = %original.display(), to = %path.display(), "changed working directory");
    Ok(Self { original })
  }

  pub fn original(&self) -> &Path {
    &self.original
  }
}

impl Drop for WorkingDirGuard {
  fn drop(&mut self) {
    match std::env::set_current_dir(&self.original) {
      Ok(()) => debug!(to = %self.original.display(), "restored working directory"),
      Err(err) => warn!(
        path = %self.original.display(),
        error = %err,
        "failed to restore working directory"
      ),
    }
  }
}
