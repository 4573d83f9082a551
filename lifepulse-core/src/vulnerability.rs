//! Human vulnerability scoring
//!
//! Maps an individual's stress level, sleep and reported symptoms into a
//! susceptibility score in [0, 1].
//!
//! Global invariants enforced:
//! - Result is always within [0, 1]
//! - Symptom order does not affect the result; duplicates are counted

use crate::normalize::unit_clamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stress scale ceiling
const STRESS_MAX: f64 = 10.0;
/// Share of the score that maximal stress contributes
const STRESS_WEIGHT: f64 = 0.5;

const SHORT_SLEEP_HOURS: f64 = 5.0;
const SHORT_SLEEP_PENALTY: f64 = 0.4;
const REDUCED_SLEEP_HOURS: f64 = 7.0;
const REDUCED_SLEEP_PENALTY: f64 = 0.2;

pub const DEFAULT_STRESS: f64 = 0.0;
pub const DEFAULT_SLEEP: f64 = 7.0;

/// Per-symptom weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomWeights {
    pub known: BTreeMap<String, f64>,
    /// Weight for any tag missing from `known`
    pub unknown: f64,
}

impl Default for SymptomWeights {
    fn default() -> Self {
        let known = [
            ("cough", 0.2),
            ("fever", 0.25),
            ("breathing_issue", 0.4),
            ("headache", 0.15),
        ]
        .into_iter()
        .map(|(tag, w)| (tag.to_string(), w))
        .collect();

        SymptomWeights {
            known,
            unknown: 0.1,
        }
    }
}

impl SymptomWeights {
    /// Weight of a single symptom tag
    pub fn weight(&self, symptom: &str) -> f64 {
        self.known.get(symptom).copied().unwrap_or(self.unknown)
    }

    /// Sum of weights over every reported symptom
    pub fn total<S: AsRef<str>>(&self, symptoms: &[S]) -> f64 {
        symptoms.iter().map(|s| self.weight(s.as_ref())).sum()
    }
}

fn stress_contribution(stress: f64) -> f64 {
    // f64::min would otherwise turn NaN into the ceiling
    if stress.is_nan() {
        return 0.0;
    }
    (stress.min(STRESS_MAX) / STRESS_MAX) * STRESS_WEIGHT
}

fn sleep_contribution(sleep: f64) -> f64 {
    if sleep < SHORT_SLEEP_HOURS {
        SHORT_SLEEP_PENALTY
    } else if sleep < REDUCED_SLEEP_HOURS {
        REDUCED_SLEEP_PENALTY
    } else {
        0.0
    }
}

/// Vulnerability score with the default symptom table
pub fn human_vulnerability<S: AsRef<str>>(stress: f64, sleep: f64, symptoms: &[S]) -> f64 {
    human_vulnerability_with_weights(stress, sleep, symptoms, &SymptomWeights::default())
}

/// Vulnerability score with a custom symptom table
///
/// total = min(stress, 10) / 10 * 0.5 + sleep penalty + sum(symptom weights),
/// clamped to [0, 1].
pub fn human_vulnerability_with_weights<S: AsRef<str>>(
    stress: f64,
    sleep: f64,
    symptoms: &[S],
    weights: &SymptomWeights,
) -> f64 {
    let total = stress_contribution(stress) + sleep_contribution(sleep) + weights.total(symptoms);
    unit_clamp(total)
}
