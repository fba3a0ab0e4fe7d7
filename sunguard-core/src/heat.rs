//! Heat Index Estimation
//!
//! Heat index (apparent temperature) combines air temperature and relative
//! humidity. Two paths feed the same classifier:
//!
//! ### Real sensor
//! The NWS algorithm used by DHT-class sensor libraries:
//! 1. Steadman's simple average `0.5·(T + 61 + 1.2·(T − 68) + 0.094·RH)`.
//! 2. If that exceeds 79 °F, the Rothfusz regression replaces it, with the
//!    published corrections for very dry (RH < 13 %, 80..112 °F) and very
//!    humid (RH > 85 %, 80..87 °F) air.
//!
//! ### Simulated sensor
//! A potentiometer maps linearly onto 15..45 °C, humidity is pinned at 55 %,
//! and the Rothfusz regression is applied unconditionally. This table is a
//! fixed constant; it is not recalibratable.
//!
//! All public functions take and return Celsius; the regression itself runs
//! in Fahrenheit.

use crate::constants::calibration::{
    SIM_HUMIDITY_PCT, SIM_TEMP_FULL_SCALE_MV, SIM_TEMP_MAX_C, SIM_TEMP_MIN_C,
};

/// Rothfusz regression coefficients (°F, %RH)
const C1: f32 = -42.379;
const C2: f32 = 2.049_015_2;
const C3: f32 = 10.143_331;
const C4: f32 = -0.224_755_41;
const C5: f32 = -0.006_837_83;
const C6: f32 = -0.054_817_17;
const C7: f32 = 0.001_228_74;
const C8: f32 = 0.000_852_82;
const C9: f32 = -0.000_001_99;

/// Above this simple-average value (°F) the regression takes over
const REGRESSION_CUTOVER_F: f32 = 79.0;

pub fn celsius_to_fahrenheit(c: f32) -> f32 {
    c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(f: f32) -> f32 {
    (f - 32.0) * 5.0 / 9.0
}

fn rothfusz_f(t: f32, rh: f32) -> f32 {
    C1 + C2 * t + C3 * rh
        + C4 * t * rh
        + C5 * t * t
        + C6 * rh * rh
        + C7 * t * t * rh
        + C8 * t * rh * rh
        + C9 * t * t * rh * rh
}

/// Heat index for a validated real-sensor reading (°C in, °C out)
pub fn heat_index(temperature_c: f32, humidity_pct: f32) -> f32 {
    let t = celsius_to_fahrenheit(temperature_c);
    let rh = humidity_pct;

    let mut hi = 0.5 * (t + 61.0 + (t - 68.0) * 1.2 + rh * 0.094);

    if hi > REGRESSION_CUTOVER_F {
        hi = rothfusz_f(t, rh);

        if rh < 13.0 && (80.0..=112.0).contains(&t) {
            hi -= ((13.0 - rh) * 0.25) * libm::sqrtf((17.0 - libm::fabsf(t - 95.0)) * 0.058_82);
        } else if rh > 85.0 && (80.0..=87.0).contains(&t) {
            hi += ((rh - 85.0) * 0.1) * ((87.0 - t) * 0.2);
        }
    }

    fahrenheit_to_celsius(hi)
}

/// Temperature, humidity and the heat index derived from them
///
/// The three values are produced together or not at all.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Climate {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub heat_index_c: f32,
}

impl Climate {
    /// Real-sensor climate, heat index by the NWS algorithm
    pub fn measured(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            heat_index_c: heat_index(temperature_c, humidity_pct),
        }
    }

    /// Derive all three values from a smoothed pot reading
    pub fn simulated(mv: f32) -> Self {
        let temperature_c =
            SIM_TEMP_MIN_C + (mv / SIM_TEMP_FULL_SCALE_MV) * (SIM_TEMP_MAX_C - SIM_TEMP_MIN_C);
        let humidity_pct = SIM_HUMIDITY_PCT;
        let heat_index_c = fahrenheit_to_celsius(rothfusz_f(
            celsius_to_fahrenheit(temperature_c),
            humidity_pct,
        ));

        Self { temperature_c, humidity_pct, heat_index_c }
    }
}
