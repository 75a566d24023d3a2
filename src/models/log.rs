use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifies one logged session of one lift.
///
/// Ordering is (lift, week, day), so a lift's sessions sort chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LogKey {
  pub lift: String,
  pub week: u32,
  pub day: u32,
}

impl LogKey {
  pub fn new(lift: &str, week: u32, day: u32) -> Self {
    Self {
      lift: lift.to_string(),
      week,
      day,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Log Entry Variants
/// ---------------------------------------------------------------------------

/// Rep-out result on the final set of a volume lift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeLog {
  pub reps: u32,
  /// Load actually used, when it differed from the calculated weight
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub load_override: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub logged_at: Option<DateTime<Utc>>,
}

impl VolumeLog {
  pub fn new(reps: u32) -> Self {
    Self {
      reps,
      load_override: None,
      logged_at: None,
    }
  }

  pub fn with_override(reps: u32, load: f64) -> Self {
    Self {
      load_override: Some(load),
      ..Self::new(reps)
    }
  }
}

/// AMRAP results for a structured lift, keyed by set index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredLog {
  pub set_reps: BTreeMap<usize, u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub logged_at: Option<DateTime<Utc>>,
}

impl StructuredLog {
  pub fn new(set_reps: impl IntoIterator<Item = (usize, u32)>) -> Self {
    Self {
      set_reps: set_reps.into_iter().collect(),
      logged_at: None,
    }
  }
}

/// Pass/fail outcome of a linear session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearLog {
  pub success: bool,
  /// Consecutive failures carried into this session (not counting it)
  pub consecutive_failures: u32,
  /// This session's failure reached the deload threshold
  #[serde(default)]
  pub deload_triggered: bool,
  /// Working weight used
  pub weight: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub logged_at: Option<DateTime<Utc>>,
}

/// Timestamp shared by every log variant
pub trait Timestamped {
  fn stamp_if_missing(&mut self, at: DateTime<Utc>);
}

macro_rules! impl_timestamped {
  ($($ty:ty),*) => {
    $(impl Timestamped for $ty {
      fn stamp_if_missing(&mut self, at: DateTime<Utc>) {
        self.logged_at.get_or_insert(at);
      }
    })*
  };
}

impl_timestamped!(VolumeLog, StructuredLog, LinearLog);

/// ---------------------------------------------------------------------------
/// Log Book: ordered log storage for one scheme
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LogBook<T> {
  entries: BTreeMap<LogKey, T>,
}

impl<T> Default for LogBook<T> {
  fn default() -> Self {
    Self {
      entries: BTreeMap::new(),
    }
  }
}

impl<T> LogBook<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or overwrite, returning the replaced entry
  pub fn insert(&mut self, key: LogKey, entry: T) -> Option<T> {
    self.entries.insert(key, entry)
  }

  pub fn get(&self, lift: &str, week: u32, day: u32) -> Option<&T> {
    self.entries.get(&LogKey::new(lift, week, day))
  }

  /// Last-day entry for a lift within a week
  pub fn latest_in_week(&self, lift: &str, week: u32) -> Option<&T> {
    self
      .entries
      .range(LogKey::new(lift, week, 0)..=LogKey::new(lift, week, u32::MAX))
      .next_back()
      .map(|(_, entry)| entry)
  }

  /// Most recent entry for a lift strictly before (week, day)
  pub fn latest_before(&self, lift: &str, week: u32, day: u32) -> Option<(&LogKey, &T)> {
    self
      .entries
      .range(LogKey::new(lift, 0, 0)..LogKey::new(lift, week, day))
      .next_back()
  }

  /// Most recent entry for a lift across the whole program
  pub fn latest(&self, lift: &str) -> Option<(&LogKey, &T)> {
    self
      .entries
      .range(LogKey::new(lift, 0, 0)..=LogKey::new(lift, u32::MAX, u32::MAX))
      .next_back()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<T> FromIterator<(LogKey, T)> for LogBook<T> {
  fn from_iter<I: IntoIterator<Item = (LogKey, T)>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}

// Serialized as a flat list of records so keys survive JSON
#[derive(Serialize)]
struct LogRecordRef<'a, T> {
  lift: &'a str,
  week: u32,
  day: u32,
  entry: &'a T,
}

#[derive(Deserialize)]
struct LogRecord<T> {
  lift: String,
  week: u32,
  day: u32,
  entry: T,
}

impl<T: Serialize> Serialize for LogBook<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(self.entries.iter().map(|(key, entry)| LogRecordRef {
      lift: &key.lift,
      week: key.week,
      day: key.day,
      entry,
    }))
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for LogBook<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let records = Vec::<LogRecord<T>>::deserialize(deserializer)?;
    Ok(
      records
        .into_iter()
        .map(|record| {
          (
            LogKey {
              lift: record.lift,
              week: record.week,
              day: record.day,
            },
            record.entry,
          )
        })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn book() -> LogBook<VolumeLog> {
    let mut book = LogBook::new();
    book.insert(LogKey::new("Squat", 1, 1), VolumeLog::new(10));
    book.insert(LogKey::new("Squat", 1, 3), VolumeLog::new(11));
    book.insert(LogKey::new("Squat", 2, 1), VolumeLog::new(12));
    book.insert(LogKey::new("Bench Press", 1, 2), VolumeLog::new(8));
    book
  }

  #[test]
  fn test_latest_in_week_takes_last_day() {
    let book = book();
    assert_eq!(book.latest_in_week("Squat", 1).map(|l| l.reps), Some(11));
    assert_eq!(book.latest_in_week("Squat", 3), None);
    assert_eq!(book.latest_in_week("Deadlift", 1), None);
  }

  #[test]
  fn test_latest_before_is_strict_and_lexicographic() {
    let book = book();

    let (key, entry) = book.latest_before("Squat", 2, 1).expect("should find week 1");
    assert_eq!((key.week, key.day), (1, 3));
    assert_eq!(entry.reps, 11);

    let (key, _) = book.latest_before("Squat", 2, 2).expect("should find week 2");
    assert_eq!((key.week, key.day), (2, 1));

    assert!(book.latest_before("Squat", 1, 1).is_none());
    // Other lifts never leak into the scan
    assert!(book.latest_before("Bench Press", 1, 2).is_none());
  }

  #[test]
  fn test_insert_overwrites() {
    let mut book = book();
    let replaced = book.insert(LogKey::new("Squat", 1, 1), VolumeLog::new(15));

    assert_eq!(replaced.map(|l| l.reps), Some(10));
    assert_eq!(book.get("Squat", 1, 1).map(|l| l.reps), Some(15));
    assert_eq!(book.len(), 4);
  }

  #[test]
  fn test_latest_per_lift() {
    let book = book();

    let (key, entry) = book.latest("Squat").expect("squat entries");
    assert_eq!((key.week, key.day), (2, 1));
    assert_eq!(entry.reps, 12);

    let (key, _) = book.latest("Bench Press").expect("bench entry");
    assert_eq!((key.week, key.day), (1, 2));
    assert!(book.latest("Deadlift").is_none());
  }

  #[test]
  fn test_log_book_json_shape() {
    let json = r#"[
      {"lift": "Bench Press", "week": 1, "day": 1, "entry": {"set_reps": {"2": 9}}},
      {"lift": "Bench Press", "week": 2, "day": 1, "entry": {"set_reps": {"2": 7, "5": 12}}}
    ]"#;

    let book: LogBook<StructuredLog> = serde_json::from_str(json).expect("should parse");

    assert_eq!(book.len(), 2);
    let week_two = book.get("Bench Press", 2, 1).expect("week 2 entry");
    assert_eq!(week_two.set_reps.get(&5), Some(&12));

    let value = serde_json::to_value(&book).expect("should serialize");
    assert_eq!(value[0]["lift"], "Bench Press");
    assert_eq!(value[1]["entry"]["set_reps"]["2"], 7);
  }

  #[test]
  fn test_stamp_if_missing_keeps_existing() {
    let earlier = Utc::now() - chrono::Duration::days(3);
    let mut log = VolumeLog::new(5);
    log.logged_at = Some(earlier);

    log.stamp_if_missing(Utc::now());
    assert_eq!(log.logged_at, Some(earlier));

    let mut fresh = StructuredLog::new([(3, 10)]);
    fresh.stamp_if_missing(earlier);
    assert_eq!(fresh.logged_at, Some(earlier));
  }
}
