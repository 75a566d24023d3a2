//! Commands for resolved day plans

use crate::models::TrainingState;
use crate::plan::{resolve_day, resolve_plan, DayPlans, ResolvedItem};

/// Every visible day of a week, fully resolved
pub fn get_week_plan(state: &TrainingState, week: u32) -> Result<DayPlans, String> {
  resolve_plan(state, week).map_err(|e| format!("Failed to resolve week {}: {}", week, e))
}

/// One day of a week. Hidden days come back empty.
pub fn get_day_plan(state: &TrainingState, week: u32, day: u32) -> Result<Vec<ResolvedItem>, String> {
  resolve_day(state, week, day).map_err(|e| format!("Failed to resolve week {} day {}: {}", week, day, e))
}
