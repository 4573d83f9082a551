//! Trend semantics - short-term AQI momentum from recent history
//!
//! Only the endpoints of the series matter: momentum = last - first.
//!
//! Global invariants enforced:
//! - A series with any non-finite entry carries no trend signal
//! - Fewer than two entries carry no trend signal

/// Momentum above which pollution is considered surging
const SURGE_MOMENTUM: f64 = 30.0;
/// Momentum above which pollution is considered rising
const RISE_MOMENTUM: f64 = 10.0;
/// Momentum below which pollution is considered clearing
const CLEARING_MOMENTUM: f64 = -20.0;

/// Trend direction derived from momentum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Surging,
    Rising,
    Steady,
    Clearing,
}

impl TrendDirection {
    /// Classify a momentum value
    pub fn from_momentum(momentum: f64) -> Self {
        if momentum > SURGE_MOMENTUM {
            TrendDirection::Surging
        } else if momentum > RISE_MOMENTUM {
            TrendDirection::Rising
        } else if momentum < CLEARING_MOMENTUM {
            TrendDirection::Clearing
        } else {
            TrendDirection::Steady
        }
    }

    /// Multiplier applied to the environmental score
    pub fn multiplier(&self) -> f64 {
        match self {
            TrendDirection::Surging => 1.12,
            TrendDirection::Rising => 1.05,
            TrendDirection::Steady => 1.0,
            TrendDirection::Clearing => 0.92,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Surging => "surging",
            TrendDirection::Rising => "rising",
            TrendDirection::Steady => "steady",
            TrendDirection::Clearing => "clearing",
        }
    }
}

/// Momentum of a history series (last - first)
///
/// `None` when the series is too short or contains a non-finite entry.
pub fn momentum(history: &[f64]) -> Option<f64> {
    if history.iter().any(|v| !v.is_finite()) {
        tracing::debug!(len = history.len(), "history contains non-finite values, ignoring trend");
        return None;
    }
    match (history.first(), history.last()) {
        (Some(first), Some(last)) if history.len() >= 2 => Some(last - first),
        _ => None,
    }
}

/// Trend multiplier for a history series; 1.0 when there is no signal
pub fn trend_factor(history: &[f64]) -> f64 {
    match momentum(history) {
        Some(m) => TrendDirection::from_momentum(m).multiplier(),
        None => 1.0,
    }
}
