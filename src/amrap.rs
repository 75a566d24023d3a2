//! Primary AMRAP set lookup for structured lifts
//!
//! The primary set is the progression signal for a structured lift:
//! - a 1-plus AMRAP (target of a single rep) always wins
//! - otherwise the heaviest AMRAP set, first one on ties
//! - no AMRAP set at all means no progression signal

use serde::{Deserialize, Serialize};

use crate::models::SetDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimarySet {
    /// Position in the week's set list (the key used by structured logs)
    pub index: usize,
    pub target_reps: u32,
    pub intensity: f64,
}

impl PrimarySet {
    fn from_descriptor(index: usize, set: &SetDescriptor) -> Self {
        Self {
            index,
            target_reps: set.target_reps,
            intensity: set.intensity,
        }
    }
}

pub fn locate_primary_set(sets: &[SetDescriptor]) -> Option<PrimarySet> {
    let amrap_sets = || sets.iter().enumerate().filter(|(_, set)| set.is_amrap);

    if let Some((index, set)) = amrap_sets().find(|(_, set)| set.target_reps == 1) {
        return Some(PrimarySet::from_descriptor(index, set));
    }

    let mut heaviest: Option<(usize, &SetDescriptor)> = None;
    for (index, set) in amrap_sets() {
        // Strict comparison keeps the first of equal intensities
        if heaviest.is_none_or(|(_, best)| set.intensity > best.intensity) {
            heaviest = Some((index, set));
        }
    }

    heaviest.map(|(index, set)| PrimarySet::from_descriptor(index, set))
}
