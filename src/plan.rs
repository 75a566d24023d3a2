//! Day plan resolution
//!
//! Walks each visible day's exercise list for a week and turns every item
//! into concrete loads, sets and rep targets using the projected training
//! max. Deload weeks with an empty set list simply drop the item.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{ExerciseItem, TrainingState};
use crate::progression::{self, linear, structured, volume};

/// ---------------------------------------------------------------------------
/// Resolved Prescription
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSet {
  pub index: usize,
  pub intensity: f64,
  pub target_reps: u32,
  pub is_amrap: bool,
  pub weight: f64,
  /// Only ever set on AMRAP sets
  #[serde(skip_serializing_if = "Option::is_none")]
  pub logged_reps: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedItem {
  CapacityDisplay {
    lift: String,
    capacity: f64,
    recommended_single: f64,
  },
  Volume {
    lift: String,
    weight: f64,
    intensity: f64,
    sets: u32,
    reps: u32,
    rep_out_target: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    logged_reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_override: Option<f64>,
    /// Percentage change the logged result earns for next week
    #[serde(skip_serializing_if = "Option::is_none")]
    next_week_adjustment: Option<f64>,
  },
  Structured {
    lift: String,
    capacity: f64,
    sets: Vec<ResolvedSet>,
  },
  Linear {
    lift: String,
    weight: f64,
    sets: u32,
    reps: u32,
    consecutive_failures: u32,
    deload_pending: bool,
    logged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    logged_success: Option<bool>,
  },
  Accessory {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
  },
}

impl ResolvedItem {
  pub fn lift(&self) -> Option<&str> {
    match self {
      ResolvedItem::CapacityDisplay { lift, .. }
      | ResolvedItem::Volume { lift, .. }
      | ResolvedItem::Structured { lift, .. }
      | ResolvedItem::Linear { lift, .. } => Some(lift),
      ResolvedItem::Accessory { .. } => None,
    }
  }
}

/// Resolved items for every visible day of a week
pub type DayPlans = BTreeMap<u32, Vec<ResolvedItem>>;

/// ---------------------------------------------------------------------------
/// Resolution
/// ---------------------------------------------------------------------------

/// Resolve every visible day of `week`.
///
/// A week the program does not declare fails the whole call with
/// `PlannerError::InvalidWeek`.
pub fn resolve_plan(state: &TrainingState, week: u32) -> PlannerResult<DayPlans> {
  ensure_week(state, week)?;

  let plans: DayPlans = state
    .definition
    .visible_days(week)
    .into_iter()
    .map(|day| (day, resolve_items(state, week, day)))
    .collect();

  debug!(week, days = plans.len(), "resolved week plan");
  Ok(plans)
}

/// Resolve one day of `week`. A day hidden that week resolves to nothing.
pub fn resolve_day(state: &TrainingState, week: u32, day: u32) -> PlannerResult<Vec<ResolvedItem>> {
  ensure_week(state, week)?;

  if !state.definition.visible_days(week).contains(&day) {
    debug!(week, day, "day not visible this week");
    return Ok(Vec::new());
  }
  Ok(resolve_items(state, week, day))
}

fn ensure_week(state: &TrainingState, week: u32) -> PlannerResult<()> {
  if state.definition.has_week(week) {
    Ok(())
  } else {
    Err(PlannerError::InvalidWeek(week))
  }
}

fn resolve_items(state: &TrainingState, week: u32, day: u32) -> Vec<ResolvedItem> {
  state
    .definition
    .days
    .get(&day)
    .map(|items| {
      items
        .iter()
        .filter_map(|item| resolve_item(state, item, week, day))
        .collect()
    })
    .unwrap_or_default()
}

fn resolve_item(state: &TrainingState, item: &ExerciseItem, week: u32, day: u32) -> Option<ResolvedItem> {
  match item {
    ExerciseItem::CapacityDisplay { lift } => {
      let capacity = progression::capacity_at(state, lift, week, day);
      let percent = state.definition.recommended_single_percent_for(lift);
      Some(ResolvedItem::CapacityDisplay {
        lift: lift.clone(),
        capacity,
        recommended_single: state.round(capacity * percent),
      })
    }

    ExerciseItem::Volume { lift } => {
      let Some(table) = state.definition.volume_week(lift, week) else {
        debug!(lift = lift.as_str(), week, "no volume table entry, skipping");
        return None;
      };
      let log = state.logs.volume.latest_in_week(lift, week);
      let load_override = log.and_then(|entry| entry.load_override);
      let weight = match load_override {
        Some(load) => load,
        None => state.round(volume::capacity(state, lift, week) * table.intensity),
      };

      Some(ResolvedItem::Volume {
        lift: lift.clone(),
        weight,
        intensity: table.intensity,
        sets: table.sets,
        reps: table.reps,
        rep_out_target: table.rep_out_target,
        logged_reps: log.map(|entry| entry.reps),
        load_override,
        next_week_adjustment: volume::next_week_adjustment(state, lift, week),
      })
    }

    ExerciseItem::Structured { lift } => {
      let sets = state.definition.sets_for_week(lift, week);
      if sets.is_empty() {
        debug!(lift = lift.as_str(), week, "empty set list, skipping");
        return None;
      }

      let capacity = structured::capacity(state, lift, week);
      let log = state.logs.structured.latest_in_week(lift, week);
      let resolved = sets
        .iter()
        .enumerate()
        .map(|(index, set)| ResolvedSet {
          index,
          intensity: set.intensity,
          target_reps: set.target_reps,
          is_amrap: set.is_amrap,
          weight: state.round(capacity * set.intensity),
          logged_reps: if set.is_amrap {
            log.and_then(|entry| entry.set_reps.get(&index).copied())
          } else {
            None
          },
        })
        .collect();

      Some(ResolvedItem::Structured {
        lift: lift.clone(),
        capacity,
        sets: resolved,
      })
    }

    ExerciseItem::Linear { lift, sets, reps } => {
      let projection = linear::project(state, lift, week, day);
      let logged = state.logs.linear.get(lift, week, day);

      Some(ResolvedItem::Linear {
        lift: lift.clone(),
        weight: projection.weight,
        sets: *sets,
        reps: *reps,
        consecutive_failures: projection.consecutive_failures,
        deload_pending: projection.deload_pending,
        logged: logged.is_some(),
        logged_success: logged.map(|entry| entry.success),
      })
    }

    ExerciseItem::Accessory {
      name,
      sets,
      reps,
      notes,
    } => Some(ResolvedItem::Accessory {
      name: name.clone(),
      sets: *sets,
      reps: reps.clone(),
      notes: notes.clone(),
    }),
  }
}
