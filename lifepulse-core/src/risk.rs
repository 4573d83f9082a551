//! AQI risk classification
//!
//! Global invariants enforced:
//! - Classification depends on the AQI value alone
//! - Monotonic: a higher AQI never yields a lower level

use serde::{Deserialize, Serialize};

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,    // <= 50
    Medium, // 50-200
    High,   // 200-300
    Severe, // > 300
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Severe => "SEVERE",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configurable AQI upper bounds (inclusive) for each level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            low: 50.0,
            medium: 200.0,
            high: 300.0,
        }
    }
}

/// Assign risk level with default thresholds
pub fn classify_risk(aqi: f64) -> RiskLevel {
    classify_risk_with_thresholds(aqi, &RiskThresholds::default())
}

/// Assign risk level with custom thresholds
pub fn classify_risk_with_thresholds(aqi: f64, thresholds: &RiskThresholds) -> RiskLevel {
    if aqi <= thresholds.low {
        RiskLevel::Low
    } else if aqi <= thresholds.medium {
        RiskLevel::Medium
    } else if aqi <= thresholds.high {
        RiskLevel::High
    } else {
        RiskLevel::Severe
    }
}
