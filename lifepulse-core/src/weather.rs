//! Weather modifier
//!
//! Converts humidity, wind and temperature into a multiplicative factor on
//! the environmental score. Penalties are additive and independent across
//! categories; the two wind bands are mutually exclusive.

/// Humidity (%) above which stagnant, moist air adds a penalty
const HUMID_THRESHOLD: f64 = 80.0;
const HUMID_PENALTY: f64 = 0.10;

/// Near-calm wind (m/s): pollutants barely disperse
const CALM_WIND_THRESHOLD: f64 = 1.0;
const CALM_WIND_PENALTY: f64 = 0.15;

/// Light wind (m/s)
const LIGHT_WIND_THRESHOLD: f64 = 2.0;
const LIGHT_WIND_PENALTY: f64 = 0.07;

/// Heat (°C)
const HEAT_THRESHOLD: f64 = 38.0;
const HEAT_PENALTY: f64 = 0.10;

/// Cold (°C)
const COLD_THRESHOLD: f64 = 5.0;
const COLD_PENALTY: f64 = 0.08;

pub const DEFAULT_HUMIDITY: f64 = 50.0;
pub const DEFAULT_WIND_SPEED: f64 = 3.0;
pub const DEFAULT_TEMPERATURE: f64 = 25.0;

/// Compute the weather risk modifier
///
/// Baseline is 1.0. There is no upper bound: every penalty can fire at once
/// except the two wind bands. NaN inputs fail every comparison and so add
/// nothing.
pub fn weather_modifier(humidity: f64, wind_speed: f64, temperature: f64) -> f64 {
    let mut modifier = 1.0;

    if humidity > HUMID_THRESHOLD {
        modifier += HUMID_PENALTY;
    }

    if wind_speed < CALM_WIND_THRESHOLD {
        modifier += CALM_WIND_PENALTY;
    } else if wind_speed < LIGHT_WIND_THRESHOLD {
        modifier += LIGHT_WIND_PENALTY;
    }

    if temperature > HEAT_THRESHOLD {
        modifier += HEAT_PENALTY;
    }

    if temperature < COLD_THRESHOLD {
        modifier += COLD_PENALTY;
    }

    modifier
}
