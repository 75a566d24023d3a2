//! Absolute-weight progression for structured (AMRAP) lifts
//!
//! The reps hit on each week's primary AMRAP set add a fixed number of
//! pounds to the training max. Deltas add, they do not multiply, and carry
//! forward week over week.

use tracing::debug;

use crate::amrap::locate_primary_set;
use crate::models::TrainingState;

/// Name fragments that mark a lift as lower body
pub const LOWER_BODY_KEYWORDS: [&str; 5] = ["squat", "deadlift", "leg", "lunge", "hip"];

pub fn is_lower_body(lift: &str) -> bool {
    let name = lift.to_lowercase();
    LOWER_BODY_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}

/// Weight change earned by an AMRAP result.
///
/// A 1-plus set (target of one rep) has its own table regardless of body
/// region. Lower-body misses stall instead of dropping.
pub fn structured_progression(reps: u32, target_reps: u32, is_upper_body: bool) -> f64 {
    if target_reps == 1 {
        return match reps {
            0..=1 => 0.0,
            2..=4 => 5.0,
            _ => 10.0,
        };
    }

    if reps < target_reps {
        return if is_upper_body { -5.0 } else { 0.0 };
    }

    match (reps - target_reps, is_upper_body) {
        (0, true) => 0.0,
        (1..=2, true) => 5.0,
        (_, true) => 10.0,
        (0, false) => 5.0,
        (1..=2, false) => 10.0,
        (_, false) => 15.0,
    }
}

/// Training max for `lift` in `week`
pub fn capacity(state: &TrainingState, lift: &str, week: u32) -> f64 {
    let start = state.starting_capacity(lift);
    (1..week.max(1)).fold(start, |capacity, prior| capacity + week_delta(state, lift, prior))
}

/// Training max for every week from 1 through `through_week`, in order
pub fn capacity_history(state: &TrainingState, lift: &str, through_week: u32) -> Vec<f64> {
    let mut history = Vec::with_capacity(through_week as usize);
    let mut capacity = state.starting_capacity(lift);
    for week in 1..=through_week {
        history.push(capacity);
        capacity += week_delta(state, lift, week);
    }
    history
}

/// Delta earned by `week`'s primary-set result (0 when there is no signal)
pub fn week_delta(state: &TrainingState, lift: &str, week: u32) -> f64 {
    let sets = state.definition.sets_for_week(lift, week);
    let Some(primary) = locate_primary_set(sets) else {
        return 0.0;
    };
    let Some(reps) = state
        .logs
        .structured
        .latest_in_week(lift, week)
        .and_then(|log| log.set_reps.get(&primary.index).copied())
    else {
        return 0.0;
    };

    let delta = structured_progression(reps, primary.target_reps, !is_lower_body(lift));
    debug!(
        lift,
        week,
        reps,
        target_reps = primary.target_reps,
        delta,
        "structured delta"
    );
    delta
}
