//! Prediction responses and output rendering
//!
//! Global invariants enforced:
//! - Predictions appear in the same order as the request's readings
//! - Byte-for-byte identical output across runs

use crate::scoring::RiskResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Risk result paired with the symptoms it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub risk: RiskResult,
    pub symptoms: Vec<String>,
}

/// Response to a prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: Vec<Prediction>,
}

impl PredictionResponse {
    /// Serialize to a pretty JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize prediction response")
    }
}

/// Render a response as a fixed-width table
pub fn render_text(response: &PredictionResponse) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<4} {:<8} {:<6} {:<6} {:<6} {:<6} {}\n",
        "#", "RISK", "AQI", "ENV", "HUMAN", "CONF", "SYMPTOMS"
    ));

    for (index, prediction) in response.predictions.iter().enumerate() {
        let risk = &prediction.risk;
        let symptoms = if prediction.symptoms.is_empty() {
            "-".to_string()
        } else {
            prediction.symptoms.join(", ")
        };
        output.push_str(&format!(
            "{:<4} {:<8} {:<6} {:<6.2} {:<6.2} {:<6.2} {}\n",
            index + 1,
            risk.risk.as_str(),
            risk.final_aqi,
            risk.env_score,
            risk.human_score,
            risk.confidence,
            symptoms,
        ));
    }

    output
}

/// Render a response as pretty JSON
pub fn render_json(response: &PredictionResponse) -> String {
    response
        .to_json()
        .unwrap_or_else(|_| r#"{"predictions": []}"#.to_string())
}
