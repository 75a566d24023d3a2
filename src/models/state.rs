use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::log::{LinearLog, LogBook, LogKey, StructuredLog, Timestamped, VolumeLog};
use super::program::ProgramDefinition;
use crate::rounding::round_to_increment;

/// Logged history for all three progression schemes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingLogs {
  #[serde(default)]
  pub volume: LogBook<VolumeLog>,
  #[serde(default)]
  pub structured: LogBook<StructuredLog>,
  #[serde(default)]
  pub linear: LogBook<LinearLog>,
}

impl TrainingLogs {
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }
}

/// ---------------------------------------------------------------------------
/// Training State: the unit of computation
/// ---------------------------------------------------------------------------

/// Working copy of a program plus everything the user has logged.
///
/// Projection and plan resolution only ever borrow this. Mutation happens
/// through the `record_*` and override methods.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingState {
  pub definition: ProgramDefinition,
  pub starting_capacities: BTreeMap<String, f64>,
  pub rounding_increment: f64,
  pub logs: TrainingLogs,
}

impl TrainingState {
  pub fn new(definition: ProgramDefinition) -> Self {
    Self::with_logs(definition, TrainingLogs::default())
  }

  pub fn with_logs(definition: ProgramDefinition, logs: TrainingLogs) -> Self {
    Self {
      starting_capacities: definition.starting_capacities.clone(),
      rounding_increment: definition.rounding_increment,
      definition,
      logs,
    }
  }

  /// Starting capacity for a lift (0 for a lift the program never names)
  pub fn starting_capacity(&self, lift: &str) -> f64 {
    match self.starting_capacities.get(lift) {
      Some(capacity) => *capacity,
      None => {
        tracing::warn!(lift, "no starting capacity for lift, using 0");
        0.0
      }
    }
  }

  /// Round a load with this state's increment
  pub fn round(&self, value: f64) -> f64 {
    round_to_increment(value, self.rounding_increment)
  }

  pub fn override_starting_capacity(&mut self, lift: &str, capacity: f64) {
    self.starting_capacities.insert(lift.to_string(), capacity);
  }

  pub fn set_rounding_increment(&mut self, increment: f64) {
    self.rounding_increment = increment;
  }

  pub fn record_volume(&mut self, lift: &str, week: u32, day: u32, mut entry: VolumeLog) -> Option<VolumeLog> {
    entry.stamp_if_missing(Utc::now());
    self.logs.volume.insert(LogKey::new(lift, week, day), entry)
  }

  pub fn record_structured(
    &mut self,
    lift: &str,
    week: u32,
    day: u32,
    mut entry: StructuredLog,
  ) -> Option<StructuredLog> {
    entry.stamp_if_missing(Utc::now());
    self.logs.structured.insert(LogKey::new(lift, week, day), entry)
  }

  pub fn record_linear(&mut self, lift: &str, week: u32, day: u32, mut entry: LinearLog) -> Option<LinearLog> {
    entry.stamp_if_missing(Utc::now());
    self.logs.linear.insert(LogKey::new(lift, week, day), entry)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::mock_volume_program;

  #[test]
  fn test_new_copies_definition_values() {
    let definition = mock_volume_program();
    let state = TrainingState::new(definition.clone());

    assert_eq!(state.starting_capacities, definition.starting_capacities);
    assert_eq!(state.rounding_increment, definition.rounding_increment);
    assert!(state.logs.volume.is_empty());
  }

  #[test]
  fn test_overrides_leave_definition_untouched() {
    let mut state = TrainingState::new(mock_volume_program());

    state.override_starting_capacity("Squat", 315.0);
    state.set_rounding_increment(2.5);

    assert_eq!(state.starting_capacity("Squat"), 315.0);
    assert_eq!(state.definition.starting_capacities["Squat"], 170.0);
    assert_eq!(state.round(101.3), 102.5);
  }

  #[test]
  fn test_unknown_lift_capacity_is_zero() {
    let state = TrainingState::new(mock_volume_program());
    assert_eq!(state.starting_capacity("Zercher Squat"), 0.0);
  }

  #[test]
  fn test_record_stamps_and_overwrites() {
    let mut state = TrainingState::new(mock_volume_program());

    assert!(state.record_volume("Squat", 1, 1, VolumeLog::new(12)).is_none());
    let replaced = state.record_volume("Squat", 1, 1, VolumeLog::new(14));

    assert_eq!(replaced.map(|l| l.reps), Some(12));
    let stored = state.logs.volume.get("Squat", 1, 1).expect("stored entry");
    assert_eq!(stored.reps, 14);
    assert!(stored.logged_at.is_some());
  }

  #[test]
  fn test_logs_from_json_defaults_missing_books() {
    let logs = TrainingLogs::from_json(
      r#"{"linear": [{"lift": "Squat", "week": 1, "day": 1,
          "entry": {"success": true, "consecutive_failures": 0, "weight": 225.0}}]}"#,
    )
    .expect("should parse");

    assert!(logs.volume.is_empty());
    assert!(logs.structured.is_empty());
    let entry = logs.linear.get("Squat", 1, 1).expect("linear entry");
    assert!(entry.success);
    assert!(!entry.deload_triggered);
  }
}
