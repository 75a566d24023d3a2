//! UI-facing entry points
//!
//! Every command takes the training state explicitly and returns
//! `Result<T, String>` so the front end gets a displayable message.

pub mod percentile;
pub mod plan;
pub mod progression;

use crate::models::TrainingState;

fn ensure_week(state: &TrainingState, week: u32) -> Result<(), String> {
  if state.definition.has_week(week) {
    Ok(())
  } else {
    Err(format!("Week {} is not part of {}", week, state.definition.name))
  }
}

fn ensure_lift(state: &TrainingState, lift: &str) -> Result<(), String> {
  if state.starting_capacities.contains_key(lift) || state.definition.lifts().contains(lift) {
    Ok(())
  } else {
    Err(format!("Unknown lift: {}", lift))
  }
}
