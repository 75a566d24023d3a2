use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::{ProgressionConfig, WeightAdjustmentTable};
use crate::error::{PlannerError, PlannerResult};

pub const DEFAULT_ROUNDING_INCREMENT: f64 = 5.0;
pub const DEFAULT_RECOMMENDED_SINGLE_PERCENT: f64 = 0.90;

/// ---------------------------------------------------------------------------
/// Per-Week Prescription Tables
/// ---------------------------------------------------------------------------

/// One week of a volume lift: percentage-of-capacity sets ending in a rep-out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeWeek {
  pub intensity: f64,
  pub sets: u32,
  pub reps: u32,
  /// Minimum reps expected on the final set
  pub rep_out_target: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetDescriptor {
  pub intensity: f64,
  pub target_reps: u32,
  #[serde(default)]
  pub is_amrap: bool,
}

/// Set layout for a structured lift.
///
/// A week listed in `weekly_sets` replaces the static `sets` entirely. An
/// empty list (either source) means the lift is skipped that week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetScheme {
  #[serde(default)]
  pub sets: Vec<SetDescriptor>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub weekly_sets: BTreeMap<u32, Vec<SetDescriptor>>,
}

impl SetScheme {
  pub fn sets_for_week(&self, week: u32) -> &[SetDescriptor] {
    self.weekly_sets.get(&week).unwrap_or(&self.sets)
  }
}

/// ---------------------------------------------------------------------------
/// Exercise Items
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseItem {
  /// Current training max plus a recommended near-max single
  CapacityDisplay { lift: String },
  /// Percentage sets with a rep-out on the last set
  Volume { lift: String },
  /// AMRAP-aware set list, possibly varying by week
  Structured { lift: String },
  /// Fixed sets x reps at full working weight, pass/fail outcome
  Linear { lift: String, sets: u32, reps: u32 },
  /// Free text, no calculated load
  Accessory {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
  },
}

impl ExerciseItem {
  /// The lift this item is calculated against (None for accessories)
  pub fn lift(&self) -> Option<&str> {
    match self {
      ExerciseItem::CapacityDisplay { lift }
      | ExerciseItem::Volume { lift }
      | ExerciseItem::Structured { lift }
      | ExerciseItem::Linear { lift, .. } => Some(lift),
      ExerciseItem::Accessory { .. } => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
  #[default]
  Lb,
  Kg,
}

impl WeightUnit {
  pub const LB_PER_KG: f64 = 2.204_622_621_8;

  pub fn to_kg(self, weight: f64) -> f64 {
    match self {
      WeightUnit::Lb => weight / Self::LB_PER_KG,
      WeightUnit::Kg => weight,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Program Definition
/// ---------------------------------------------------------------------------

fn default_rounding_increment() -> f64 {
  DEFAULT_ROUNDING_INCREMENT
}

/// Immutable program definition, loaded once when a program is selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDefinition {
  pub name: String,
  pub weeks: Vec<u32>,
  pub starting_capacities: BTreeMap<String, f64>,
  #[serde(default)]
  pub volume_tables: BTreeMap<String, BTreeMap<u32, VolumeWeek>>,
  #[serde(default)]
  pub set_schemes: BTreeMap<String, SetScheme>,
  pub days: BTreeMap<u32, Vec<ExerciseItem>>,
  /// week -> visible days. None means every day shows every week.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub day_visibility: Option<BTreeMap<u32, Vec<u32>>>,
  #[serde(default = "default_rounding_increment")]
  pub rounding_increment: f64,
  #[serde(default)]
  pub recommended_single_percent: BTreeMap<String, f64>,
  #[serde(default)]
  pub units: WeightUnit,
  #[serde(default)]
  pub progression: ProgressionConfig,
  #[serde(default)]
  pub adjustment_table: WeightAdjustmentTable,
}

impl ProgramDefinition {
  pub fn from_json(json: &str) -> PlannerResult<Self> {
    let definition: Self = serde_json::from_str(json)?;
    definition.validate()?;
    Ok(definition)
  }

  pub fn to_json(&self) -> PlannerResult<String> {
    Ok(serde_json::to_string(self)?)
  }

  pub fn has_week(&self, week: u32) -> bool {
    self.weeks.contains(&week)
  }

  /// Days shown in `week`, in day order
  pub fn visible_days(&self, week: u32) -> Vec<u32> {
    match &self.day_visibility {
      None => self.days.keys().copied().collect(),
      Some(visibility) => {
        let allowed = visibility.get(&week).map(Vec::as_slice).unwrap_or(&[]);
        self
          .days
          .keys()
          .copied()
          .filter(|day| allowed.contains(day))
          .collect()
      }
    }
  }

  pub fn volume_week(&self, lift: &str, week: u32) -> Option<&VolumeWeek> {
    self.volume_tables.get(lift)?.get(&week)
  }

  /// Set list for a structured lift in `week` (empty when absent)
  pub fn sets_for_week(&self, lift: &str, week: u32) -> &[SetDescriptor] {
    self
      .set_schemes
      .get(lift)
      .map(|scheme| scheme.sets_for_week(week))
      .unwrap_or(&[])
  }

  pub fn recommended_single_percent_for(&self, lift: &str) -> f64 {
    self
      .recommended_single_percent
      .get(lift)
      .copied()
      .unwrap_or(DEFAULT_RECOMMENDED_SINGLE_PERCENT)
  }

  /// Every lift named anywhere in the program
  pub fn lifts(&self) -> BTreeSet<String> {
    let mut lifts: BTreeSet<String> = self.starting_capacities.keys().cloned().collect();
    lifts.extend(self.volume_tables.keys().cloned());
    lifts.extend(self.set_schemes.keys().cloned());
    for item in self.days.values().flatten() {
      if let Some(lift) = item.lift() {
        lifts.insert(lift.to_string());
      }
    }
    lifts
  }

  /// Structural checks run after loading
  pub fn validate(&self) -> PlannerResult<()> {
    if self.weeks.is_empty() {
      return Err(PlannerError::InvalidConfig("program declares no weeks".into()));
    }

    for item in self.days.values().flatten() {
      if let Some(lift) = item.lift() {
        if !self.starting_capacities.contains_key(lift) {
          return Err(PlannerError::InvalidConfig(format!(
            "no starting capacity for lift: {}",
            lift
          )));
        }
      }
      match item {
        ExerciseItem::Volume { lift } if !self.volume_tables.contains_key(lift) => {
          return Err(PlannerError::InvalidConfig(format!(
            "volume item without a volume table: {}",
            lift
          )));
        }
        ExerciseItem::Structured { lift } if !self.set_schemes.contains_key(lift) => {
          return Err(PlannerError::InvalidConfig(format!(
            "structured item without a set scheme: {}",
            lift
          )));
        }
        _ => {}
      }
    }

    let non_finite = self
      .starting_capacities
      .iter()
      .find(|(_, capacity)| !capacity.is_finite());
    if let Some((lift, _)) = non_finite {
      return Err(PlannerError::InvalidConfig(format!(
        "starting capacity is not a number: {}",
        lift
      )));
    }

    if !self.rounding_increment.is_finite() {
      return Err(PlannerError::InvalidConfig(
        "rounding increment is not a number".into(),
      ));
    }

    Ok(())
  }
}
