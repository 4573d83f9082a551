//! Numeric helpers shared by every scoring stage
//!
//! Global invariants enforced:
//! - Every function here is total: no panics, no error values
//! - Non-finite inputs never leak into a score

use serde_json::Value;

/// Scale `value` into [0, 1] relative to `max_val`
///
/// Returns 0 when either argument is non-finite or when `max_val <= 0`,
/// so callers never need a failure path.
pub fn normalize(value: f64, max_val: f64) -> f64 {
    if !value.is_finite() || !max_val.is_finite() || max_val <= 0.0 {
        return 0.0;
    }
    unit_clamp(value / max_val)
}

/// Clamp to [0, 1]; NaN maps to 0
pub fn unit_clamp(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Round to two decimal places, ties to even
pub fn round2(x: f64) -> f64 {
    let scaled = x * 100.0;
    let mut rounded = scaled.round();
    // f64::round sends ties away from zero; pull odd ties back
    if (scaled - scaled.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded -= scaled.signum();
    }
    rounded / 100.0
}

/// Parse a JSON value as a finite number
///
/// Accepts numbers and numeric strings (surrounding whitespace ignored).
/// Everything else yields `None` and the caller substitutes its default.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Parse a JSON value, falling back to `default` when it is missing or malformed
pub fn number_or(value: &Value, default: f64) -> f64 {
    parse_number(value).unwrap_or(default)
}
