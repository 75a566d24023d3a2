//! Session-outcome progression for linear lifts
//!
//! The working weight is whatever the last logged session used:
//! - success adds the lift's increment and clears the failure count
//! - failure holds the weight and counts up
//! - reaching the failure threshold deloads and resets the count
//!
//! The failure count stored on each log entry is the only source of truth.
//! Projection never re-derives it by walking older sessions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProgressionConfig;
use crate::models::{LinearLog, TrainingState};

/// Working weight and failure streak going into a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearProjection {
    pub weight: f64,
    pub consecutive_failures: u32,
    /// A failure in this session would trigger a deload
    pub deload_pending: bool,
}

/// True when one more failure reaches the deload threshold
pub fn will_deload_on_failure(config: &ProgressionConfig, consecutive_failures: u32) -> bool {
    consecutive_failures.saturating_add(1) >= config.failure_threshold
}

/// Project the session at (week, day) from everything logged before it
pub fn project(state: &TrainingState, lift: &str, week: u32, day: u32) -> LinearProjection {
    let config = &state.definition.progression;

    let (weight, consecutive_failures) = match state.logs.linear.latest_before(lift, week, day) {
        None => (state.starting_capacity(lift), 0),
        Some((_, last)) if last.success => (last.weight + config.increment_for(lift), 0),
        Some((key, last)) => {
            let failures = last.consecutive_failures.saturating_add(1);
            if failures >= config.failure_threshold {
                let deloaded = state.round(last.weight * (1.0 - config.deload_percent));
                debug!(
                    lift,
                    week = key.week,
                    day = key.day,
                    from = last.weight,
                    to = deloaded,
                    "deload after {} consecutive failures",
                    failures
                );
                (deloaded, 0)
            } else {
                (last.weight, failures)
            }
        }
    };

    LinearProjection {
        weight,
        consecutive_failures,
        deload_pending: will_deload_on_failure(config, consecutive_failures),
    }
}

pub fn is_deload_pending(state: &TrainingState, lift: &str, week: u32, day: u32) -> bool {
    project(state, lift, week, day).deload_pending
}

/// Working weight the lift would drop to if the projected session fails
pub fn deload_weight(state: &TrainingState, projection: &LinearProjection) -> f64 {
    let config = &state.definition.progression;
    state.round(projection.weight * (1.0 - config.deload_percent))
}

/// Build the entry a caller should persist for a finished session
pub fn session_log(config: &ProgressionConfig, projection: &LinearProjection, success: bool) -> LinearLog {
    LinearLog {
        success,
        consecutive_failures: projection.consecutive_failures,
        deload_triggered: !success && will_deload_on_failure(config, projection.consecutive_failures),
        weight: projection.weight,
        logged_at: None,
    }
}
