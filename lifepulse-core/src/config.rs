//! Configuration file support for LifePulse
//!
//! Loads scoring overrides from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.lifepulserc.json` in the working directory
//! 3. `lifepulse.config.json` in the working directory
//!
//! All fields are optional. Anything left out keeps its built-in default.

use crate::risk::RiskThresholds;
use crate::scoring::{AqiBasis, BlendWeights, ScoringModel};
use crate::vulnerability::SymptomWeights;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAMES: &[&str] = &[".lifepulserc.json", "lifepulse.config.json"];

/// Largest weight a single symptom may carry
const MAX_SYMPTOM_WEIGHT: f64 = 1.0;

/// LifePulse configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LifepulseConfig {
    /// Custom AQI risk level thresholds
    #[serde(default)]
    pub thresholds: Option<ThresholdConfig>,

    /// Custom confidence blend weights
    #[serde(default)]
    pub blend: Option<BlendConfig>,

    /// Extra or overridden symptom weights, keyed by tag
    #[serde(default)]
    pub symptom_weights: BTreeMap<String, f64>,

    /// Weight for symptoms with no entry (default: 0.1)
    #[serde(default)]
    pub unknown_symptom_weight: Option<f64>,

    /// Whether to classify the raw or the weather/trend-adjusted AQI (default: raw)
    #[serde(default)]
    pub aqi_basis: Option<AqiBasis>,
}

/// Custom risk level thresholds (inclusive upper bounds)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Upper AQI bound for LOW (default: 50)
    pub low: Option<f64>,
    /// Upper AQI bound for MEDIUM (default: 200)
    pub medium: Option<f64>,
    /// Upper AQI bound for HIGH (default: 300)
    pub high: Option<f64>,
}

/// Custom confidence blend weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlendConfig {
    /// Weight of the environmental score (default: 0.7)
    pub environment: Option<f64>,
    /// Weight of the human score (default: 0.3)
    pub human: Option<f64>,
}

/// Resolved configuration ready for scoring
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub model: ScoringModel,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl LifepulseConfig {
    fn resolved_thresholds(&self) -> RiskThresholds {
        let defaults = RiskThresholds::default();
        match &self.thresholds {
            Some(t) => RiskThresholds {
                low: t.low.unwrap_or(defaults.low),
                medium: t.medium.unwrap_or(defaults.medium),
                high: t.high.unwrap_or(defaults.high),
            },
            None => defaults,
        }
    }

    fn resolved_blend(&self) -> BlendWeights {
        let defaults = BlendWeights::default();
        match &self.blend {
            Some(b) => BlendWeights {
                environment: b.environment.unwrap_or(defaults.environment),
                human: b.human.unwrap_or(defaults.human),
            },
            None => defaults,
        }
    }

    fn resolved_symptoms(&self) -> SymptomWeights {
        let mut weights = SymptomWeights::default();
        for (tag, weight) in &self.symptom_weights {
            weights.known.insert(tag.clone(), *weight);
        }
        if let Some(unknown) = self.unknown_symptom_weight {
            weights.unknown = unknown;
        }
        weights
    }

    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        let t = self.resolved_thresholds();
        for (name, val) in [("low", t.low), ("medium", t.medium), ("high", t.high)] {
            if !val.is_finite() || val <= 0.0 {
                anyhow::bail!("thresholds.{} must be positive (got {})", name, val);
            }
            if val > crate::scoring::AQI_MAX {
                anyhow::bail!("thresholds.{} must be at most 500 (got {})", name, val);
            }
        }
        if t.low >= t.medium {
            anyhow::bail!(
                "thresholds.low ({}) must be less than thresholds.medium ({})",
                t.low,
                t.medium
            );
        }
        if t.medium >= t.high {
            anyhow::bail!(
                "thresholds.medium ({}) must be less than thresholds.high ({})",
                t.medium,
                t.high
            );
        }

        let b = self.resolved_blend();
        for (name, val) in [("environment", b.environment), ("human", b.human)] {
            if !(0.0..=1.0).contains(&val) {
                anyhow::bail!("blend.{} must be within [0, 1] (got {})", name, val);
            }
        }
        if b.environment + b.human <= 0.0 {
            anyhow::bail!("blend weights must not both be zero");
        }

        for (tag, weight) in &self.symptom_weights {
            if tag.trim().is_empty() {
                anyhow::bail!("symptom_weights keys must not be empty");
            }
            if !(0.0..=MAX_SYMPTOM_WEIGHT).contains(weight) {
                anyhow::bail!(
                    "symptom_weights.{} must be within [0, 1] (got {})",
                    tag,
                    weight
                );
            }
        }

        if let Some(unknown) = self.unknown_symptom_weight {
            if !(0.0..=MAX_SYMPTOM_WEIGHT).contains(&unknown) {
                anyhow::bail!(
                    "unknown_symptom_weight must be within [0, 1] (got {})",
                    unknown
                );
            }
        }

        Ok(())
    }

    /// Resolve config into a scoring model
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        Ok(ResolvedConfig {
            model: ScoringModel {
                thresholds: self.resolved_thresholds(),
                blend: self.resolved_blend(),
                symptoms: self.resolved_symptoms(),
                aqi_basis: self.aqi_basis.unwrap_or_default(),
            },
            config_path: None,
        })
    }
}

/// Discover and load a config file from a directory
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(LifepulseConfig, PathBuf)>> {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<LifepulseConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: LifepulseConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (LifepulseConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let config = LifepulseConfig::default();
        config.validate().expect("default config should be valid");
        let resolved = config.resolve().expect("default config should resolve");
        assert_eq!(resolved.model, ScoringModel::default());
        assert_eq!(resolved.model.thresholds.low, 50.0);
        assert_eq!(resolved.model.blend.environment, 0.7);
        assert_eq!(resolved.model.aqi_basis, AqiBasis::Raw);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "thresholds": {"low": 40, "medium": 150, "high": 250},
            "blend": {"environment": 0.6, "human": 0.4},
            "symptom_weights": {"wheezing": 0.35, "cough": 0.3},
            "unknown_symptom_weight": 0.05,
            "aqi_basis": "adjusted"
        }"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        let model = resolved.model;
        assert_eq!(model.thresholds.medium, 150.0);
        assert_eq!(model.blend.human, 0.4);
        assert_eq!(model.symptoms.weight("wheezing"), 0.35);
        assert_eq!(model.symptoms.weight("cough"), 0.3);
        assert_eq!(model.symptoms.weight("fever"), 0.25);
        assert_eq!(model.symptoms.weight("rash"), 0.05);
        assert_eq!(model.aqi_basis, AqiBasis::Adjusted);
    }

    #[test]
    fn test_partial_thresholds_use_defaults_for_rest() {
        let json = r#"{"thresholds": {"high": 350}}"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.model.thresholds.low, 50.0);
        assert_eq!(resolved.model.thresholds.medium, 200.0);
        assert_eq!(resolved.model.thresholds.high, 350.0);
    }

    #[test]
    fn test_reject_unknown_fields() {
        let result: Result<LifepulseConfig, _> = serde_json::from_str(r#"{"weights": {}}"#);
        assert!(result.is_err(), "unknown fields should be rejected");
    }

    #[test]
    fn test_reject_unknown_basis() {
        let result: Result<LifepulseConfig, _> = serde_json::from_str(r#"{"aqi_basis": "smoothed"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_unordered_thresholds() {
        let json = r#"{"thresholds": {"low": 250, "medium": 200}}"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_threshold_above_scale() {
        let json = r#"{"thresholds": {"high": 600}}"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_negative_threshold() {
        let json = r#"{"thresholds": {"low": -1}}"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_blend_out_of_range() {
        let json = r#"{"blend": {"environment": 1.5}}"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());

        let json = r#"{"blend": {"environment": 0, "human": 0}}"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_bad_symptom_weight() {
        let json = r#"{"symptom_weights": {"cough": 2.0}}"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());

        let json = r#"{"symptom_weights": {" ": 0.2}}"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());

        let json = r#"{"unknown_symptom_weight": -0.1}"#;
        let config: LifepulseConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discover_rc_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".lifepulserc.json");
        fs::write(&config_path, r#"{"aqi_basis": "adjusted"}"#).unwrap();

        let (config, path) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.aqi_basis, Some(AqiBasis::Adjusted));
        assert_eq!(path, config_path);
    }

    #[test]
    fn test_discover_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".lifepulserc.json"), r#"{"unknown_symptom_weight": 0.2}"#)
            .unwrap();
        fs::write(
            dir.path().join("lifepulse.config.json"),
            r#"{"unknown_symptom_weight": 0.3}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(
            config.unknown_symptom_weight,
            Some(0.2),
            ".lifepulserc.json should take priority"
        );
    }

    #[test]
    fn test_no_config_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lifepulse.config.json"), "{not json").unwrap();
        assert!(discover_config(dir.path()).is_err());
    }

    #[test]
    fn test_load_and_resolve_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert!(resolved.config_path.is_none());
        assert_eq!(resolved.model, ScoringModel::default());
    }

    #[test]
    fn test_load_and_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.json");
        fs::write(&config_path, r#"{"blend": {"environment": 0.5, "human": 0.5}}"#).unwrap();

        let resolved = load_and_resolve(dir.path(), Some(&config_path)).unwrap();
        assert_eq!(resolved.model.blend.environment, 0.5);
        assert_eq!(resolved.config_path, Some(config_path));
    }
}
