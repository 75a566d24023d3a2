//! Percentage-adjustment progression for volume lifts
//!
//! Each week's rep-out result moves the training max by a percentage from
//! the adjustment table. Adjustments compound week over week. A missing log
//! counts as hitting the target exactly.

use tracing::{debug, warn};

use crate::models::TrainingState;

/// Training max for `lift` in `week`
pub fn capacity(state: &TrainingState, lift: &str, week: u32) -> f64 {
    let mut capacity = state.starting_capacity(lift);
    for prior in 1..week.max(1) {
        capacity = next_capacity(state, lift, prior, capacity);
    }
    capacity
}

/// Training max for every week from 1 through `through_week`, in order
pub fn capacity_history(state: &TrainingState, lift: &str, through_week: u32) -> Vec<f64> {
    let mut history = Vec::with_capacity(through_week as usize);
    let mut capacity = state.starting_capacity(lift);
    for week in 1..=through_week {
        history.push(capacity);
        capacity = next_capacity(state, lift, week, capacity);
    }
    history
}

/// Carry `capacity` for `week` forward into the following week
pub fn next_capacity(state: &TrainingState, lift: &str, week: u32, capacity: f64) -> f64 {
    let basis = override_basis(state, lift, week).unwrap_or(capacity);
    let adjustment = next_week_adjustment(state, lift, week).unwrap_or(0.0);
    let next = basis * (1.0 + adjustment);

    debug!(
        lift,
        week,
        basis,
        adjustment,
        next,
        "volume capacity carried forward"
    );
    next
}

/// Signed rep-out difference (actual - target) for a logged week
pub fn rep_difference(state: &TrainingState, lift: &str, week: u32) -> Option<i64> {
    let target = state.definition.volume_week(lift, week)?.rep_out_target;
    let actual = state.logs.volume.latest_in_week(lift, week)?.reps;
    Some(i64::from(actual) - i64::from(target))
}

/// Percentage change a week's log implies for the next week (None if unlogged)
pub fn next_week_adjustment(state: &TrainingState, lift: &str, week: u32) -> Option<f64> {
    rep_difference(state, lift, week).map(|diff| state.definition.adjustment_table.adjustment(diff))
}

/// Training max back-solved from a logged load override
fn override_basis(state: &TrainingState, lift: &str, week: u32) -> Option<f64> {
    let load = state.logs.volume.latest_in_week(lift, week)?.load_override?;
    match state.definition.volume_week(lift, week) {
        Some(table) if table.intensity > 0.0 => Some(load / table.intensity),
        _ => {
            warn!(lift, week, load, "load override without a usable intensity, ignoring");
            None
        }
    }
}
