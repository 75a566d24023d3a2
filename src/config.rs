//! Progression tuning, runtime settings and program file loading
//!
//! The adjustment tables here are the product's tuning. Existing users'
//! history was computed against these exact values.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlannerResult;
use crate::models::{ProgramDefinition, TrainingLogs};

/// ---------------------------------------------------------------------------
/// Linear Progression Config
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
  /// Added after every successful session
  pub default_increment: f64,
  /// Per-lift increments (e.g. a larger jump for deadlifts)
  pub lift_increments: BTreeMap<String, f64>,
  /// Consecutive failures that trigger a deload
  pub failure_threshold: u32,
  /// Fraction removed from the working weight on deload
  pub deload_percent: f64,
}

impl Default for ProgressionConfig {
  fn default() -> Self {
    Self {
      default_increment: 5.0,
      lift_increments: BTreeMap::new(),
      failure_threshold: 3,
      deload_percent: 0.10,
    }
  }
}

impl ProgressionConfig {
  pub fn increment_for(&self, lift: &str) -> f64 {
    self
      .lift_increments
      .get(lift)
      .copied()
      .unwrap_or(self.default_increment)
  }
}

/// ---------------------------------------------------------------------------
/// Volume Weight Adjustment Table
/// ---------------------------------------------------------------------------

/// Fractional training max change keyed by (actual - target) reps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightAdjustmentTable {
  pub missed_by_two_or_more: f64,
  pub missed_by_one: f64,
  pub on_target: f64,
  pub over_by_one: f64,
  pub over_by_two: f64,
  pub over_by_three: f64,
  pub over_by_four: f64,
  pub over_by_five_or_more: f64,
}

impl Default for WeightAdjustmentTable {
  fn default() -> Self {
    Self {
      missed_by_two_or_more: -0.05,
      missed_by_one: -0.02,
      on_target: 0.0,
      over_by_one: 0.005,
      over_by_two: 0.01,
      over_by_three: 0.015,
      over_by_four: 0.02,
      over_by_five_or_more: 0.03,
    }
  }
}

impl WeightAdjustmentTable {
  pub fn adjustment(&self, rep_difference: i64) -> f64 {
    match rep_difference {
      d if d <= -2 => self.missed_by_two_or_more,
      -1 => self.missed_by_one,
      0 => self.on_target,
      1 => self.over_by_one,
      2 => self.over_by_two,
      3 => self.over_by_three,
      4 => self.over_by_four,
      _ => self.over_by_five_or_more,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Runtime Settings
/// ---------------------------------------------------------------------------

pub const ROUNDING_INCREMENT_VAR: &str = "PLANNER_ROUNDING_INCREMENT";
pub const LOG_FILTER_VAR: &str = "PLANNER_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

/// Settings read from the environment (and `.env` via dotenvy)
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSettings {
  /// Overrides the program's rounding increment when set
  pub rounding_increment: Option<f64>,
  pub log_filter: String,
}

impl Default for PlannerSettings {
  fn default() -> Self {
    Self {
      rounding_increment: None,
      log_filter: DEFAULT_LOG_FILTER.to_string(),
    }
  }
}

impl PlannerSettings {
  pub fn from_env() -> Self {
    let rounding_increment = env::var(ROUNDING_INCREMENT_VAR).ok().and_then(|raw| {
      let parsed = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
      if parsed.is_none() {
        tracing::warn!("Ignoring unparseable {}: {}", ROUNDING_INCREMENT_VAR, raw);
      }
      parsed
    });

    Self {
      rounding_increment,
      log_filter: env::var(LOG_FILTER_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
    }
  }
}

/// ---------------------------------------------------------------------------
/// File Loading
/// ---------------------------------------------------------------------------

/// Load and validate a program definition from a JSON file
pub fn load_program(path: &Path) -> PlannerResult<ProgramDefinition> {
  let json = fs::read_to_string(path)?;
  let definition = ProgramDefinition::from_json(&json)?;
  tracing::debug!(
    "Loaded program '{}' ({} weeks, {} days) from {}",
    definition.name,
    definition.weeks.len(),
    definition.days.len(),
    path.display()
  );
  Ok(definition)
}

/// Load logged history from a JSON file
pub fn load_logs(path: &Path) -> PlannerResult<TrainingLogs> {
  let json = fs::read_to_string(path)?;
  let logs = TrainingLogs::from_json(&json)?;
  tracing::debug!(
    "Loaded {} volume, {} structured, {} linear log entries",
    logs.volume.len(),
    logs.structured.len(),
    logs.linear.len()
  );
  Ok(logs)
}
