//! Commands for training max queries and session logging

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ensure_lift, ensure_week};
use crate::models::{LinearLog, StructuredLog, TrainingState, VolumeLog};
use crate::progression::{self, linear, CapacityPoint, ProgressionScheme};

/// Deload outlook for a linear lift going into a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeloadStatus {
    pub lift: String,
    pub week: u32,
    pub day: u32,
    pub current_weight: f64,
    pub consecutive_failures: u32,
    pub failure_threshold: u32,
    pub deload_pending: bool,
    /// Weight the lift drops to if this session fails and triggers a deload
    pub deload_weight: f64,
}

/// Training max of every lift at the start of a week
pub fn get_capacity_table(state: &TrainingState, week: u32) -> Result<BTreeMap<String, f64>, String> {
    ensure_week(state, week)?;
    Ok(progression::capacity_table(state, week))
}

/// Week-by-week training max for one lift
pub fn get_capacity_history(
    state: &TrainingState,
    lift: &str,
    through_week: u32,
) -> Result<Vec<CapacityPoint>, String> {
    ensure_lift(state, lift)?;
    Ok(progression::capacity_history(state, lift, through_week))
}

/// Whether a failure in this session would deload a linear lift
pub fn get_deload_status(state: &TrainingState, lift: &str, week: u32, day: u32) -> Result<DeloadStatus, String> {
    ensure_linear(state, lift)?;
    ensure_week(state, week)?;

    let projection = linear::project(state, lift, week, day);
    Ok(DeloadStatus {
        lift: lift.to_string(),
        week,
        day,
        current_weight: projection.weight,
        consecutive_failures: projection.consecutive_failures,
        failure_threshold: state.definition.progression.failure_threshold,
        deload_pending: projection.deload_pending,
        deload_weight: linear::deload_weight(state, &projection),
    })
}

/// Record a finished linear session at its projected weight.
///
/// Later sessions store the failure streak they were projected with, so a
/// session can only be logged at or after the lift's latest logged session.
pub fn log_linear_session(
    state: &mut TrainingState,
    lift: &str,
    week: u32,
    day: u32,
    success: bool,
) -> Result<LinearLog, String> {
    ensure_linear(state, lift)?;
    ensure_week(state, week)?;
    if let Some((latest, _)) = state.logs.linear.latest(lift) {
        if (week, day) < (latest.week, latest.day) {
            return Err(format!(
                "{} already has a session logged at week {} day {}",
                lift, latest.week, latest.day
            ));
        }
    }

    let projection = linear::project(state, lift, week, day);
    let entry = linear::session_log(&state.definition.progression, &projection, success);
    if entry.deload_triggered {
        info!(lift, week, day, weight = entry.weight, "failure threshold reached, next session deloads");
    }

    state.record_linear(lift, week, day, entry);
    state
        .logs
        .linear
        .get(lift, week, day)
        .cloned()
        .ok_or_else(|| format!("Failed to record session for {}", lift))
}

/// Record the rep-out result of a volume lift, with an optional load override
pub fn log_volume_set(
    state: &mut TrainingState,
    lift: &str,
    week: u32,
    day: u32,
    reps: u32,
    load_override: Option<f64>,
) -> Result<(), String> {
    ensure_week(state, week)?;
    if state.definition.volume_week(lift, week).is_none() {
        return Err(format!("{} has no volume prescription in week {}", lift, week));
    }

    let entry = match load_override {
        Some(load) if !load.is_finite() || load <= 0.0 => {
            return Err(format!("Invalid load override: {}", load));
        }
        Some(load) => VolumeLog::with_override(reps, load),
        None => VolumeLog::new(reps),
    };

    state.record_volume(lift, week, day, entry);
    Ok(())
}

/// Record reps hit on the AMRAP sets of a structured lift, keyed by set index
pub fn log_amrap_sets(
    state: &mut TrainingState,
    lift: &str,
    week: u32,
    day: u32,
    set_reps: BTreeMap<usize, u32>,
) -> Result<(), String> {
    ensure_week(state, week)?;
    let sets = state.definition.sets_for_week(lift, week);
    if sets.is_empty() {
        return Err(format!("{} has no sets in week {}", lift, week));
    }

    for index in set_reps.keys() {
        match sets.get(*index) {
            Some(set) if set.is_amrap => {}
            Some(_) => return Err(format!("Set {} of {} is not an AMRAP set", index, lift)),
            None => return Err(format!("{} has no set {} in week {}", lift, index, week)),
        }
    }

    state.record_structured(lift, week, day, StructuredLog::new(set_reps));
    Ok(())
}

fn ensure_linear(state: &TrainingState, lift: &str) -> Result<(), String> {
    ensure_lift(state, lift)?;
    match ProgressionScheme::for_lift(state, lift) {
        ProgressionScheme::Linear => Ok(()),
        scheme => Err(format!("{} progresses with the {} scheme, not linear", lift, scheme)),
    }
}
