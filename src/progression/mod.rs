//! Training Max Projection Engine
//!
//! Projects a lift's training max ("capacity") forward week by week from
//! the logged history. Three schemes share the role:
//! - volume: percentage adjustments from rep-out results, compounding
//! - structured: absolute pound deltas from the primary AMRAP set
//! - linear: pass/fail sessions with failure-triggered deloads
//!
//! Key principles:
//! - Deterministic: same state in, same numbers out
//! - A missing log is never a penalty, it holds the current value
//! - Nothing is cached, every query recomputes from the logs

pub mod linear;
pub mod structured;
pub mod volume;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::TrainingState;

// ---------------------------------------------------------------------------
/// Progression Scheme: which strategy tracks a lift
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionScheme {
    /// Percentage adjustment from rep-out sets
    Volume,
    /// Absolute adjustment from a primary AMRAP set
    Structured,
    /// Session success/failure
    Linear,
}

impl std::fmt::Display for ProgressionScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Volume => write!(f, "volume"),
            Self::Structured => write!(f, "structured"),
            Self::Linear => write!(f, "linear"),
        }
    }
}

impl std::str::FromStr for ProgressionScheme {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "volume" => Ok(Self::Volume),
            "structured" => Ok(Self::Structured),
            "linear" => Ok(Self::Linear),
            _ => Err(format!("Unknown progression scheme: {}", s)),
        }
    }
}

impl ProgressionScheme {
    /// A lift with a volume table is volume, one with a set scheme is
    /// structured, anything else progresses linearly.
    pub fn for_lift(state: &TrainingState, lift: &str) -> Self {
        if state.definition.volume_tables.contains_key(lift) {
            Self::Volume
        } else if state.definition.set_schemes.contains_key(lift) {
            Self::Structured
        } else {
            Self::Linear
        }
    }
}

// ---------------------------------------------------------------------------
/// Capacity Queries
// ---------------------------------------------------------------------------

/// One point on a lift's training max chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPoint {
    pub week: u32,
    pub capacity: f64,
}

/// Training max at the start of `week`
pub fn capacity(state: &TrainingState, lift: &str, week: u32) -> f64 {
    // Day 0 sorts before every session of the week
    capacity_at(state, lift, week, 0)
}

/// Training max for a specific session. Only the linear scheme cares
/// about the day.
pub fn capacity_at(state: &TrainingState, lift: &str, week: u32, day: u32) -> f64 {
    match ProgressionScheme::for_lift(state, lift) {
        ProgressionScheme::Volume => volume::capacity(state, lift, week),
        ProgressionScheme::Structured => structured::capacity(state, lift, week),
        ProgressionScheme::Linear => linear::project(state, lift, week, day).weight,
    }
}

/// Training max of every lift in the program at the start of `week`
pub fn capacity_table(state: &TrainingState, week: u32) -> BTreeMap<String, f64> {
    let mut lifts = state.definition.lifts();
    lifts.extend(state.starting_capacities.keys().cloned());

    lifts
        .into_iter()
        .map(|lift| {
            let value = capacity(state, &lift, week);
            (lift, value)
        })
        .collect()
}

/// Training max per declared program week, up to and including `through_week`.
///
/// `through_week` is capped at the program's last week.
pub fn capacity_history(state: &TrainingState, lift: &str, through_week: u32) -> Vec<CapacityPoint> {
    let last_week = state.definition.weeks.iter().copied().max().unwrap_or(0);
    let through_week = through_week.min(last_week);

    let weeks: Vec<u32> = state
        .definition
        .weeks
        .iter()
        .copied()
        .filter(|week| *week <= through_week)
        .collect();

    let running = match ProgressionScheme::for_lift(state, lift) {
        ProgressionScheme::Volume => Some(volume::capacity_history(state, lift, through_week)),
        ProgressionScheme::Structured => Some(structured::capacity_history(state, lift, through_week)),
        ProgressionScheme::Linear => None,
    };

    weeks
        .into_iter()
        .map(|week| {
            let value = running
                .as_ref()
                .and_then(|history| history.get(week.saturating_sub(1) as usize).copied())
                .unwrap_or_else(|| capacity(state, lift, week));
            CapacityPoint {
                week,
                capacity: value,
            }
        })
        .collect()
}
