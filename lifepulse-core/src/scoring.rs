//! Combined risk scoring
//!
//! Blends the environmental score (AQI adjusted by weather and trend) with
//! the human vulnerability score, and classifies the AQI into a risk level.
//!
//! Global invariants enforced:
//! - No error path: every input yields a RiskResult
//! - env_score, human_score and confidence lie in [0, 1]
//! - final_aqi lies in [0, 500]
//! - Identical input yields identical output

use crate::input::{EnvironmentReading, HealthReading, HistorySeries};
use crate::normalize::{normalize, round2, unit_clamp};
use crate::risk::{classify_risk_with_thresholds, RiskLevel, RiskThresholds};
use crate::trends::{momentum, TrendDirection};
use crate::vulnerability::{human_vulnerability_with_weights, SymptomWeights};
use crate::weather::weather_modifier;
use serde::{Deserialize, Serialize};

/// AQI scale ceiling
pub const AQI_MAX: f64 = 500.0;

/// Which AQI value drives classification and the environmental score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AqiBasis {
    /// Classify the measured AQI; weather and trend only scale env_score
    #[default]
    Raw,
    /// Scale the AQI by weather and trend first, then classify and score it
    Adjusted,
}

impl AqiBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            AqiBasis::Raw => "raw",
            AqiBasis::Adjusted => "adjusted",
        }
    }
}

/// Weights for blending the two scores into confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub environment: f64,
    pub human: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        BlendWeights {
            environment: 0.7,
            human: 0.3,
        }
    }
}

/// Every tunable constant of the scoring pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringModel {
    pub thresholds: RiskThresholds,
    pub blend: BlendWeights,
    pub symptoms: SymptomWeights,
    pub aqi_basis: AqiBasis,
}

/// Scoring output for one individual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk: RiskLevel,
    #[serde(rename = "finalAQI")]
    pub final_aqi: u32,
    #[serde(rename = "envScore")]
    pub env_score: f64,
    #[serde(rename = "humanScore")]
    pub human_score: f64,
    pub confidence: f64,
}

/// Clamp an AQI reading into [0, 500]; NaN reads as 0
fn clamp_aqi(aqi: f64) -> f64 {
    if aqi.is_nan() {
        0.0
    } else {
        aqi.clamp(0.0, AQI_MAX)
    }
}

/// Score one reading with the default model
pub fn calculate_risk(
    health: &HealthReading,
    environment: &EnvironmentReading,
    history: &HistorySeries,
) -> RiskResult {
    calculate_risk_with_model(health, environment, history, &ScoringModel::default())
}

/// Score one reading with a custom model
pub fn calculate_risk_with_model(
    health: &HealthReading,
    environment: &EnvironmentReading,
    history: &HistorySeries,
    model: &ScoringModel,
) -> RiskResult {
    let real_aqi = clamp_aqi(environment.aqi);

    let weather_risk = weather_modifier(
        environment.humidity,
        environment.wind_speed,
        environment.temperature,
    );

    let trend = momentum(history.as_slice()).map(TrendDirection::from_momentum);
    let trend_risk = trend.map_or(1.0, |t| t.multiplier());

    tracing::trace!(
        real_aqi,
        weather_risk,
        trend = trend.map_or("none", |t| t.as_str()),
        trend_risk,
        "environmental factors"
    );

    let (scored_aqi, env_score) = match model.aqi_basis {
        AqiBasis::Raw => {
            let env = unit_clamp(normalize(real_aqi, AQI_MAX) * weather_risk * trend_risk);
            (real_aqi, env)
        }
        AqiBasis::Adjusted => {
            let adjusted = clamp_aqi(real_aqi * weather_risk * trend_risk);
            (adjusted, normalize(adjusted, AQI_MAX))
        }
    };

    let human_score = human_vulnerability_with_weights(
        health.stress,
        health.sleep,
        health.symptoms.as_slice(),
        &model.symptoms,
    );

    let confidence =
        unit_clamp(env_score * model.blend.environment + human_score * model.blend.human);

    let risk = classify_risk_with_thresholds(scored_aqi, &model.thresholds);

    let result = RiskResult {
        risk,
        final_aqi: scored_aqi.trunc() as u32,
        env_score: round2(env_score),
        human_score: round2(human_score),
        confidence: round2(confidence),
    };

    tracing::debug!(
        risk = %result.risk,
        final_aqi = result.final_aqi,
        env_score = result.env_score,
        human_score = result.human_score,
        confidence = result.confidence,
        "scored reading"
    );

    result
}
