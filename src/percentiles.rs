//! Strength Percentiles
//!
//! Ranks a training max against competition results from OpenPowerlifting.
//! The table is pre-computed per sex and IPF weight class, with optional
//! per-age-bracket breakdowns, and all loads are in kilograms.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlannerResult;

/// IPF weight class upper bounds (kg). Anything heavier is super-heavyweight.
pub const MALE_WEIGHT_CLASSES: [u32; 8] = [59, 66, 74, 83, 93, 105, 120, 140];
pub const FEMALE_WEIGHT_CLASSES: [u32; 8] = [47, 52, 57, 63, 69, 76, 84, 100];

/// Inclusive age ranges and the bracket names the table uses
pub const AGE_BRACKETS: [(f64, f64, &str); 6] = [
  (0.0, 23.0, "junior"),
  (24.0, 39.0, "open"),
  (40.0, 49.0, "masters_40"),
  (50.0, 59.0, "masters_50"),
  (60.0, 69.0, "masters_60"),
  (70.0, 999.0, "masters_70"),
];

/// ---------------------------------------------------------------------------
/// Lifter Attributes
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
  Male,
  Female,
}

impl std::fmt::Display for Sex {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Male => write!(f, "male"),
      Self::Female => write!(f, "female"),
    }
  }
}

impl std::str::FromStr for Sex {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "male" | "m" => Ok(Self::Male),
      "female" | "f" => Ok(Self::Female),
      _ => Err(format!("Unknown sex: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLift {
  Squat,
  Bench,
  Deadlift,
}

impl CompetitionLift {
  /// Map a program lift name onto a contested lift, if it is one.
  ///
  /// Variations ("Front Squat", "Romanian Deadlift") do not count.
  pub fn from_lift_name(name: &str) -> Option<Self> {
    match name.trim().to_lowercase().as_str() {
      "squat" | "back squat" | "low bar squat" | "high bar squat" => Some(Self::Squat),
      "bench" | "bench press" => Some(Self::Bench),
      "deadlift" | "conventional deadlift" | "sumo deadlift" => Some(Self::Deadlift),
      _ => None,
    }
  }
}

impl std::fmt::Display for CompetitionLift {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Squat => write!(f, "squat"),
      Self::Bench => write!(f, "bench"),
      Self::Deadlift => write!(f, "deadlift"),
    }
  }
}

/// Weight class label for a bodyweight: the first class at or above it, or
/// the heaviest class with a `+` suffix.
pub fn weight_class(sex: Sex, bodyweight_kg: f64) -> String {
  let classes = match sex {
    Sex::Male => &MALE_WEIGHT_CLASSES,
    Sex::Female => &FEMALE_WEIGHT_CLASSES,
  };

  classes
    .iter()
    .find(|class| bodyweight_kg <= f64::from(**class))
    .map(|class| class.to_string())
    .unwrap_or_else(|| format!("{}+", classes[classes.len() - 1]))
}

/// Age bracket name, or None for ages that fall between or outside brackets
pub fn age_bracket(age: f64) -> Option<&'static str> {
  AGE_BRACKETS
    .iter()
    .find(|(min, max, _)| *min <= age && age <= *max)
    .map(|(_, _, name)| *name)
}

/// ---------------------------------------------------------------------------
/// Percentile Table
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentileMetadata {
  pub source: String,
  pub url: Option<String>,
  pub lifter_count: u64,
  pub description: Option<String>,
  pub units: String,
  pub percentiles: Vec<u32>,
}

/// Distribution of one lift within a cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftPercentiles {
  pub count: u32,
  /// Percentile ("5", "50", ...) -> load in kg
  pub percentiles: BTreeMap<String, f64>,
}

impl LiftPercentiles {
  /// (percentile, kg) points ordered by percentile. Unparseable keys are skipped.
  pub fn points(&self) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = self
      .percentiles
      .iter()
      .filter_map(|(key, kg)| key.parse::<f64>().ok().map(|p| (p, *kg)))
      .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
  }

  /// Percentile a load sits at, interpolated between table points and
  /// clamped to the lowest and highest percentile listed.
  pub fn rank(&self, load_kg: f64) -> Option<f64> {
    let points = self.points();
    let (first, last) = (points.first()?, points.last()?);

    if load_kg <= first.1 {
      return Some(first.0);
    }
    if load_kg >= last.1 {
      return Some(last.0);
    }

    points.windows(2).find_map(|pair| {
      let (low, high) = (pair[0], pair[1]);
      if load_kg < low.1 || load_kg > high.1 {
        return None;
      }
      if high.1 <= low.1 {
        return Some(high.0);
      }
      let fraction = (load_kg - low.1) / (high.1 - low.1);
      Some(low.0 + fraction * (high.0 - low.0))
    })
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightClassPercentiles {
  pub all_ages: BTreeMap<CompetitionLift, LiftPercentiles>,
  pub by_age: BTreeMap<String, BTreeMap<CompetitionLift, LiftPercentiles>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentileTable {
  pub metadata: PercentileMetadata,
  pub male: BTreeMap<String, WeightClassPercentiles>,
  pub female: BTreeMap<String, WeightClassPercentiles>,
}

/// Where a lifter stands, and against which cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileRank {
  pub lift: CompetitionLift,
  pub weight_class: String,
  /// None when the all-ages cohort was used
  pub age_bracket: Option<String>,
  pub percentile: f64,
  pub sample_size: u32,
}

impl PercentileTable {
  pub fn from_json(json: &str) -> PlannerResult<Self> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn load(path: &Path) -> PlannerResult<Self> {
    let json = std::fs::read_to_string(path)?;
    Self::from_json(&json)
  }

  fn classes(&self, sex: Sex) -> &BTreeMap<String, WeightClassPercentiles> {
    match sex {
      Sex::Male => &self.male,
      Sex::Female => &self.female,
    }
  }

  /// Best cohort for a lifter: their age bracket when the table has one for
  /// this lift, otherwise all ages in the weight class.
  pub fn lookup(
    &self,
    sex: Sex,
    bodyweight_kg: f64,
    age: Option<f64>,
    lift: CompetitionLift,
  ) -> Option<(String, Option<&'static str>, &LiftPercentiles)> {
    if !bodyweight_kg.is_finite() || bodyweight_kg <= 0.0 {
      return None;
    }

    let class = weight_class(sex, bodyweight_kg);
    let cohorts = self.classes(sex).get(&class)?;

    let by_age = age
      .and_then(age_bracket)
      .and_then(|bracket| Some((bracket, cohorts.by_age.get(bracket)?.get(&lift)?)));
    if let Some((bracket, percentiles)) = by_age {
      return Some((class, Some(bracket), percentiles));
    }

    debug!(%sex, weight_class = class.as_str(), %lift, "using all-ages cohort");
    let percentiles = cohorts.all_ages.get(&lift)?;
    Some((class, None, percentiles))
  }

  /// Rank a load (kg) for a lifter. None when the table has no cohort.
  pub fn rank(
    &self,
    sex: Sex,
    bodyweight_kg: f64,
    age: Option<f64>,
    lift: CompetitionLift,
    load_kg: f64,
  ) -> Option<PercentileRank> {
    let (weight_class, bracket, percentiles) = self.lookup(sex, bodyweight_kg, age, lift)?;
    let percentile = percentiles.rank(load_kg)?;

    Some(PercentileRank {
      lift,
      weight_class,
      age_bracket: bracket.map(str::to_string),
      percentile,
      sample_size: percentiles.count,
    })
  }
}
