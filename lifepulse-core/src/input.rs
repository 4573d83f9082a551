//! Request records and the input boundary
//!
//! Raw JSON is converted into fully-populated readings here. Missing or
//! malformed numeric fields take their documented defaults during
//! deserialization, so the scoring functions only ever see complete values.
//! Only structural problems (missing `health_data` / `environment`, wrong
//! container shapes) are reported as errors.

use crate::normalize::{number_or, parse_number};
use crate::vulnerability::{DEFAULT_SLEEP, DEFAULT_STRESS};
use crate::weather::{DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE, DEFAULT_WIND_SPEED};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_AQI: f64 = 0.0;

/// One individual's physiological state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHealthReading")]
pub struct HealthReading {
    /// Hours slept
    pub sleep: f64,
    /// Stress level, nominally 0-10
    pub stress: f64,
    pub symptoms: Vec<String>,
}

impl Default for HealthReading {
    fn default() -> Self {
        HealthReading {
            sleep: DEFAULT_SLEEP,
            stress: DEFAULT_STRESS,
            symptoms: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawHealthReading {
    #[serde(default)]
    sleep: Value,
    #[serde(default)]
    stress: Value,
    #[serde(default)]
    symptoms: Value,
}

impl From<RawHealthReading> for HealthReading {
    fn from(raw: RawHealthReading) -> Self {
        HealthReading {
            sleep: number_or(&raw.sleep, DEFAULT_SLEEP),
            stress: number_or(&raw.stress, DEFAULT_STRESS),
            symptoms: symptom_tags(raw.symptoms),
        }
    }
}

/// Symptom tags from a JSON value; non-array values mean "no symptoms"
fn symptom_tags(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Shared environmental context for a request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEnvironmentReading")]
pub struct EnvironmentReading {
    pub aqi: f64,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
}

impl Default for EnvironmentReading {
    fn default() -> Self {
        EnvironmentReading {
            aqi: DEFAULT_AQI,
            temperature: DEFAULT_TEMPERATURE,
            humidity: DEFAULT_HUMIDITY,
            wind_speed: DEFAULT_WIND_SPEED,
        }
    }
}

#[derive(Deserialize)]
struct RawEnvironmentReading {
    #[serde(default)]
    aqi: Value,
    #[serde(default)]
    temperature: Value,
    #[serde(default)]
    humidity: Value,
    #[serde(default, rename = "windSpeed", alias = "wind_speed")]
    wind_speed: Value,
}

impl From<RawEnvironmentReading> for EnvironmentReading {
    fn from(raw: RawEnvironmentReading) -> Self {
        EnvironmentReading {
            aqi: number_or(&raw.aqi, DEFAULT_AQI),
            temperature: number_or(&raw.temperature, DEFAULT_TEMPERATURE),
            humidity: number_or(&raw.humidity, DEFAULT_HUMIDITY),
            wind_speed: number_or(&raw.wind_speed, DEFAULT_WIND_SPEED),
        }
    }
}

/// Past AQI values, oldest first
///
/// A JSON history with any non-numeric entry is discarded in full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct HistorySeries(Vec<f64>);

impl HistorySeries {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for HistorySeries {
    fn from(values: Vec<f64>) -> Self {
        HistorySeries(values)
    }
}

impl From<Value> for HistorySeries {
    fn from(value: Value) -> Self {
        let items = match value {
            Value::Array(items) => items,
            Value::Null => return HistorySeries::default(),
            other => {
                tracing::debug!(value = %other, "history is not an array, ignoring");
                return HistorySeries::default();
            }
        };

        let parsed: Option<Vec<f64>> = items.iter().map(parse_number).collect();
        match parsed {
            Some(values) => HistorySeries(values),
            None => {
                tracing::debug!(len = items.len(), "history has non-numeric entries, ignoring");
                HistorySeries::default()
            }
        }
    }
}

/// A complete prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub health_data: Vec<HealthReading>,
    pub environment: EnvironmentReading,
    #[serde(default)]
    pub history: HistorySeries,
}

impl PredictionRequest {
    /// Parse a request from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid prediction request")
    }

    /// Read and parse a request from a file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("failed to parse request file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_defaults_for_missing_fields() {
        let reading: HealthReading = serde_json::from_value(json!({})).unwrap();
        assert_eq!(reading, HealthReading::default());
        assert_eq!(reading.sleep, 7.0);
        assert_eq!(reading.stress, 0.0);
        assert!(reading.symptoms.is_empty());
    }

    #[test]
    fn test_health_malformed_numbers_fall_back() {
        let reading: HealthReading =
            serde_json::from_value(json!({"sleep": "lots", "stress": "8", "symptoms": "cough"}))
                .unwrap();
        assert_eq!(reading.sleep, 7.0);
        assert_eq!(reading.stress, 8.0);
        assert!(reading.symptoms.is_empty());
    }

    #[test]
    fn test_symptom_items_are_stringified() {
        let reading: HealthReading =
            serde_json::from_value(json!({"symptoms": ["cough", 3, null, "fever"]})).unwrap();
        assert_eq!(reading.symptoms, vec!["cough", "3", "fever"]);
    }

    #[test]
    fn test_environment_defaults_and_alias() {
        let env: EnvironmentReading = serde_json::from_value(json!({"aqi": 120})).unwrap();
        assert_eq!(env.aqi, 120.0);
        assert_eq!(env.temperature, 25.0);
        assert_eq!(env.humidity, 50.0);
        assert_eq!(env.wind_speed, 3.0);

        let env: EnvironmentReading =
            serde_json::from_value(json!({"aqi": "80", "wind_speed": 0.4})).unwrap();
        assert_eq!(env.aqi, 80.0);
        assert_eq!(env.wind_speed, 0.4);
    }

    #[test]
    fn test_environment_serializes_wire_names() {
        let value = serde_json::to_value(EnvironmentReading::default()).unwrap();
        assert_eq!(value["windSpeed"], json!(3.0));
    }

    #[test]
    fn test_history_parsing() {
        let history: HistorySeries = serde_json::from_value(json!([50, "85"])).unwrap();
        assert_eq!(history.as_slice(), &[50.0, 85.0]);

        let history: HistorySeries = serde_json::from_value(json!([50, "smoggy", 85])).unwrap();
        assert!(history.is_empty());

        let history: HistorySeries = serde_json::from_value(json!(null)).unwrap();
        assert!(history.is_empty());

        let history: HistorySeries = serde_json::from_value(json!({"a": 1})).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_request_requires_structure() {
        assert!(PredictionRequest::from_json(r#"{"environment": {"aqi": 10}}"#).is_err());
        assert!(PredictionRequest::from_json(r#"{"health_data": []}"#).is_err());
        assert!(PredictionRequest::from_json(r#"{"health_data": {}, "environment": {}}"#).is_err());
    }

    #[test]
    fn test_request_history_optional() {
        let request =
            PredictionRequest::from_json(r#"{"health_data": [{}], "environment": {}}"#).unwrap();
        assert_eq!(request.health_data.len(), 1);
        assert!(request.history.is_empty());
    }

    #[test]
    fn test_request_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            r#"{"health_data": [{"sleep": 5}], "environment": {"aqi": 60}, "history": [1, 2]}"#,
        )
        .unwrap();

        let request = PredictionRequest::from_file(&path).unwrap();
        assert_eq!(request.health_data[0].sleep, 5.0);
        assert_eq!(request.history.len(), 2);

        assert!(PredictionRequest::from_file(&dir.path().join("missing.json")).is_err());
    }
}
