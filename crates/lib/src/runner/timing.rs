use std::collections::BTreeMap;
use std::time::Duration;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::plan::Phase;

/// Elapsed time per executed phase.
///
/// Each phase runs at most once per invocation, so recording a phase twice
/// replaces the earlier value rather than accumulating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseTimings {
  elapsed: BTreeMap<Phase, Duration>,
}

impl PhaseTimings {
  pub fn record(&mut self, phase: Phase, elapsed: Duration) {
    self.elapsed.insert(phase, elapsed);
  }

  pub fn get(&self, phase: Phase) -> Option<Duration> {
    self.elapsed.get(&phase).copied()
  }

  pub fn iter(&self) -> impl Iterator<Item = (Phase, Duration)> + '_ {
    self.elapsed.iter().map(|(phase, elapsed)| (*phase, *elapsed))
  }

  pub fn total(&self) -> Duration {
    self.elapsed.values().sum()
  }

  pub fn is_empty(&self) -> bool {
    self.elapsed.is_empty()
  }
}

/// Serialized as `{ "<phase>": <milliseconds> }`.
impl Serialize for PhaseTimings {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.elapsed.len()))?;
    for (phase, elapsed) in &self.elapsed {
      map.serialize_entry(phase.as_str(), &(elapsed.as_millis() as u64))?;
    }
    map.end()
  }
}
