//! Error types for program loading and plan resolution
//!
//! Missing logs, missing AMRAP sets and empty set lists are not errors.
//! They resolve to neutral progression or an absent plan item.

use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PlannerError {
  #[error("Invalid week: {0} is not part of this program")]
  InvalidWeek(u32),

  #[error("Failed to read program file: {0}")]
  Io(String),

  #[error("Failed to parse program data: {0}")]
  Parse(String),

  #[error("Invalid program configuration: {0}")]
  InvalidConfig(String),
}

impl From<std::io::Error> for PlannerError {
  fn from(e: std::io::Error) -> Self {
    PlannerError::Io(e.to_string())
  }
}

impl From<serde_json::Error> for PlannerError {
  fn from(e: serde_json::Error) -> Self {
    PlannerError::Parse(e.to_string())
  }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
