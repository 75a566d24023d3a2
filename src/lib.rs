pub mod amrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod percentiles;
pub mod plan;
pub mod progression;
pub mod rounding;

#[cfg(test)]
mod test_utils;

pub use cli::run;
pub use error::{PlannerError, PlannerResult};
pub use models::{ExerciseItem, ProgramDefinition, TrainingLogs, TrainingState};
pub use plan::{resolve_day, resolve_plan, DayPlans, ResolvedItem, ResolvedSet};
pub use progression::{capacity, capacity_at, capacity_history, capacity_table, CapacityPoint, ProgressionScheme};
pub use rounding::round_to_increment;
