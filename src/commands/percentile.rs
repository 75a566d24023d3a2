//! Commands for strength percentile lookups

use super::{ensure_lift, ensure_week};
use crate::models::TrainingState;
use crate::percentiles::{CompetitionLift, PercentileRank, PercentileTable, Sex};
use crate::progression;

/// Rank a lift's training max for `week` against competition results.
///
/// `bodyweight` is in the program's units, like every capacity.
pub fn get_strength_percentile(
  state: &TrainingState,
  table: &PercentileTable,
  lift: &str,
  week: u32,
  sex: Sex,
  bodyweight: f64,
  age: Option<f64>,
) -> Result<PercentileRank, String> {
  ensure_lift(state, lift)?;
  ensure_week(state, week)?;
  let competition_lift =
    CompetitionLift::from_lift_name(lift).ok_or_else(|| format!("{} is not a competition lift", lift))?;

  let units = state.definition.units;
  let capacity_kg = units.to_kg(progression::capacity(state, lift, week));
  let bodyweight_kg = units.to_kg(bodyweight);

  table
    .rank(sex, bodyweight_kg, age, competition_lift, capacity_kg)
    .ok_or_else(|| {
      format!(
        "No percentile data for {} {} at {:.1} kg",
        sex, competition_lift, bodyweight_kg
      )
    })
}
