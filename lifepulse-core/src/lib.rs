//! LifePulse core library - health risk scoring from air quality, weather,
//! pollution trend and personal vulnerability

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Scoring is strictly per-reading
// - No global mutable state
// - No randomness, clocks, or IO inside scoring
// - Scoring never fails; malformed input degrades to documented defaults
// - Identical input yields byte-for-byte identical output

pub mod config;
pub mod input;
pub mod normalize;
pub mod report;
pub mod risk;
pub mod scoring;
pub mod trends;
pub mod vulnerability;
pub mod weather;

pub use input::{EnvironmentReading, HealthReading, HistorySeries, PredictionRequest};
pub use normalize::normalize;
pub use report::{render_json, render_text, Prediction, PredictionResponse};
pub use risk::{classify_risk, RiskLevel};
pub use scoring::{calculate_risk, calculate_risk_with_model, RiskResult, ScoringModel};
pub use trends::trend_factor;
pub use vulnerability::human_vulnerability;
pub use weather::weather_modifier;

use rayon::prelude::*;

/// Score every reading in a request with the default model
pub fn predict(request: &PredictionRequest) -> PredictionResponse {
    predict_with_model(request, &ScoringModel::default())
}

/// Score every reading in a request against its shared environment and history
///
/// Readings are independent and scored in parallel; output order matches
/// `request.health_data`.
pub fn predict_with_model(request: &PredictionRequest, model: &ScoringModel) -> PredictionResponse {
    tracing::debug!(
        readings = request.health_data.len(),
        history = request.history.len(),
        basis = model.aqi_basis.as_str(),
        "scoring request"
    );

    let predictions = request
        .health_data
        .par_iter()
        .map(|health| Prediction {
            risk: calculate_risk_with_model(health, &request.environment, &request.history, model),
            symptoms: health.symptoms.clone(),
        })
        .collect();

    PredictionResponse { predictions }
}
