//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Mock program factories, one per progression scheme plus a mixed one
//! - Helper assertions

use std::collections::BTreeMap;

use crate::config::{ProgressionConfig, WeightAdjustmentTable};
use crate::models::{ExerciseItem, ProgramDefinition, SetDescriptor, SetScheme, VolumeWeek, WeightUnit};

/// ---------------------------------------------------------------------------
/// Item Builders
/// ---------------------------------------------------------------------------

fn set(intensity: f64, target_reps: u32) -> SetDescriptor {
  SetDescriptor {
    intensity,
    target_reps,
    is_amrap: false,
  }
}

fn amrap(intensity: f64, target_reps: u32) -> SetDescriptor {
  SetDescriptor {
    intensity,
    target_reps,
    is_amrap: true,
  }
}

fn volume_week(intensity: f64, sets: u32, reps: u32, rep_out_target: u32) -> VolumeWeek {
  VolumeWeek {
    intensity,
    sets,
    reps,
    rep_out_target,
  }
}

fn volume_item(lift: &str) -> ExerciseItem {
  ExerciseItem::Volume {
    lift: lift.to_string(),
  }
}

fn structured_item(lift: &str) -> ExerciseItem {
  ExerciseItem::Structured {
    lift: lift.to_string(),
  }
}

fn linear_item(lift: &str, sets: u32, reps: u32) -> ExerciseItem {
  ExerciseItem::Linear {
    lift: lift.to_string(),
    sets,
    reps,
  }
}

fn display_item(lift: &str) -> ExerciseItem {
  ExerciseItem::CapacityDisplay {
    lift: lift.to_string(),
  }
}

fn accessory(name: &str, sets: u32, reps: &str, notes: Option<&str>) -> ExerciseItem {
  ExerciseItem::Accessory {
    name: name.to_string(),
    sets: Some(sets),
    reps: Some(reps.to_string()),
    notes: notes.map(str::to_string),
  }
}

fn base_program(name: &str, starting_capacities: &[(&str, f64)]) -> ProgramDefinition {
  ProgramDefinition {
    name: name.to_string(),
    weeks: vec![1, 2, 3, 4],
    starting_capacities: starting_capacities
      .iter()
      .map(|(lift, capacity)| (lift.to_string(), *capacity))
      .collect(),
    volume_tables: BTreeMap::new(),
    set_schemes: BTreeMap::new(),
    days: BTreeMap::new(),
    day_visibility: None,
    rounding_increment: 5.0,
    recommended_single_percent: BTreeMap::new(),
    units: WeightUnit::Lb,
    progression: ProgressionConfig::default(),
    adjustment_table: WeightAdjustmentTable::default(),
  }
}

/// Four-week volume wave: 70 / 72.5 / 75% rep-outs, then a 60% deload
fn squat_volume_table() -> BTreeMap<u32, VolumeWeek> {
  BTreeMap::from([
    (1, volume_week(0.70, 5, 10, 12)),
    (2, volume_week(0.725, 5, 8, 10)),
    (3, volume_week(0.75, 5, 6, 8)),
    (4, volume_week(0.60, 3, 5, 5)),
  ])
}

/// 5/5/3+ with an empty week 4
fn bench_set_scheme() -> SetScheme {
  SetScheme {
    sets: vec![set(0.65, 5), set(0.75, 5), amrap(0.85, 3)],
    weekly_sets: BTreeMap::from([(4, vec![])]),
  }
}

/// ---------------------------------------------------------------------------
/// Mock Program Factories
/// ---------------------------------------------------------------------------

/// Squat on a volume table, starting at 170
pub fn mock_volume_program() -> ProgramDefinition {
  let mut program = base_program("Volume Block", &[("Squat", 170.0)]);
  program
    .volume_tables
    .insert("Squat".to_string(), squat_volume_table());
  program.days = BTreeMap::from([
    (1, vec![volume_item("Squat"), accessory("Leg Curl", 3, "12", None)]),
    (2, vec![display_item("Squat")]),
  ]);
  program
}

/// Bench Press (200) and Squat (300) on AMRAP set schemes.
///
/// Squat's week 2 swaps in a heavier layout ending in a 1+ set. Week 4 is
/// an empty list for both lifts.
pub fn mock_structured_program() -> ProgramDefinition {
  let mut program = base_program("Structured Block", &[("Bench Press", 200.0), ("Squat", 300.0)]);
  program.weeks.push(5);
  program
    .set_schemes
    .insert("Bench Press".to_string(), bench_set_scheme());
  program.set_schemes.insert(
    "Squat".to_string(),
    SetScheme {
      sets: vec![set(0.70, 5), set(0.80, 3), amrap(0.90, 3)],
      weekly_sets: BTreeMap::from([
        (2, vec![set(0.75, 3), set(0.85, 2), amrap(0.95, 1)]),
        (4, vec![]),
      ]),
    },
  );
  program.days = BTreeMap::from([
    (
      1,
      vec![
        structured_item("Bench Press"),
        accessory("Dumbbell Row", 4, "10-12", Some("Pause at the top")),
      ],
    ),
    (2, vec![structured_item("Squat"), accessory("Plank", 3, "60s", None)]),
  ]);
  program
}

/// Squat (200) and Deadlift (250, +10 per success) on pass/fail progression
pub fn mock_linear_program() -> ProgramDefinition {
  let mut program = base_program("Linear Block", &[("Squat", 200.0), ("Deadlift", 250.0)]);
  program.progression = ProgressionConfig {
    default_increment: 5.0,
    lift_increments: BTreeMap::from([("Deadlift".to_string(), 10.0)]),
    failure_threshold: 3,
    deload_percent: 0.10,
  };
  program.days = BTreeMap::from([
    (1, vec![linear_item("Squat", 3, 5)]),
    (2, vec![linear_item("Deadlift", 1, 5)]),
    (3, vec![linear_item("Squat", 3, 5)]),
  ]);
  program
}

/// One lift per scheme: Squat (volume, 170), Bench Press (structured, 200)
/// and Barbell Row (linear, 135). Week 4 only shows day 1.
pub fn mock_mixed_program() -> ProgramDefinition {
  let mut program = base_program(
    "Mixed Block",
    &[("Squat", 170.0), ("Bench Press", 200.0), ("Barbell Row", 135.0)],
  );
  program
    .volume_tables
    .insert("Squat".to_string(), squat_volume_table());
  program
    .set_schemes
    .insert("Bench Press".to_string(), bench_set_scheme());
  program
    .recommended_single_percent
    .insert("Bench Press".to_string(), 0.93);
  program.days = BTreeMap::from([
    (
      1,
      vec![
        volume_item("Squat"),
        linear_item("Barbell Row", 3, 5),
        accessory("Face Pull", 3, "15-20", None),
      ],
    ),
    (
      2,
      vec![
        display_item("Bench Press"),
        structured_item("Bench Press"),
        linear_item("Barbell Row", 3, 5),
      ],
    ),
    (
      3,
      vec![
        display_item("Squat"),
        linear_item("Barbell Row", 3, 5),
        accessory("Back Extension", 3, "10", Some("Bodyweight")),
      ],
    ),
  ]);
  program.day_visibility = Some(BTreeMap::from([
    (1, vec![1, 2, 3]),
    (2, vec![1, 2, 3]),
    (3, vec![1, 2, 3]),
    (4, vec![1]),
  ]));
  program
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let left: f64 = $left;
    let right: f64 = $right;
    let diff = (left - right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      left,
      right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mock_programs_validate() {
    for program in [
      mock_volume_program(),
      mock_structured_program(),
      mock_linear_program(),
      mock_mixed_program(),
    ] {
      assert!(program.validate().is_ok(), "{} should validate", program.name);
    }
  }

  #[test]
  fn test_mock_programs_survive_json() {
    let program = mock_mixed_program();
    let parsed = ProgramDefinition::from_json(&program.to_json().expect("should serialize")).expect("should parse");

    assert_eq!(parsed.days, program.days);
    assert_eq!(parsed.set_schemes.len(), program.set_schemes.len());
    assert_eq!(parsed.day_visibility, program.day_visibility);
  }

  #[test]
  fn test_mixed_program_has_one_lift_per_scheme() {
    let program = mock_mixed_program();
    let lifts: Vec<String> = program.lifts().into_iter().collect();

    assert_eq!(lifts, vec!["Barbell Row", "Bench Press", "Squat"]);
  }
}
