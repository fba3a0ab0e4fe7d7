//! Millivolt to UV Index Mapping
//!
//! Two linear mappings share one output scale:
//!
//! ```text
//! real:       uvi = (mv − zero) · 11 / max(50, uvi11 − zero)
//! simulated:  uvi = (clamp(mv, zero, max') − zero) · 11 / (max' − zero)
//!             where max' = max(max, zero + 100)
//! ```
//!
//! Both results are clamped to [0, 12.5]. The ceiling sits above the nominal
//! 0..11 scale so sensor overshoot still reads as "extreme" without feeding
//! runaway values into classification.
//!
//! Real calibration is fixed at build time. Simulated calibration is changed
//! at run time by operator commands (`z`, `x`, `c`); its minimum span is
//! enforced here, at use, so a transiently inverted pair never divides by
//! zero and never surfaces as an error.

use crate::constants::calibration::{
    SIM_UV_MAX_MV, SIM_UV_MIN_SPAN_MV, SIM_UV_ZERO_MV, UVI_CEILING, UVI_SPAN_TOP,
    UV_REAL_MIN_SPAN_MV, UV_REAL_UVI11_MV, UV_REAL_ZERO_MV,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed calibration of the real UV sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RealUvCalibration {
    /// Output in darkness (mV)
    pub zero_mv: f32,
    /// Output at UV index 11 (mV)
    pub uvi11_mv: f32,
}

impl Default for RealUvCalibration {
    fn default() -> Self {
        Self {
            zero_mv: UV_REAL_ZERO_MV,
            uvi11_mv: UV_REAL_UVI11_MV,
        }
    }
}

impl RealUvCalibration {
    /// Map a real-sensor reading to UV index
    pub fn uv_index(&self, mv: f32) -> f32 {
        let span = (self.uvi11_mv - self.zero_mv).max(UV_REAL_MIN_SPAN_MV);
        clamp_uvi((mv - self.zero_mv) * (UVI_SPAN_TOP / span))
    }
}

/// Run-time adjustable calibration of the simulated UV potentiometer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Calibration {
    /// Reading mapped to UV index 0 (mV)
    pub zero_mv: f32,
    /// Reading mapped to UV index 11 (mV)
    pub max_mv: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            zero_mv: SIM_UV_ZERO_MV,
            max_mv: SIM_UV_MAX_MV,
        }
    }
}

impl Calibration {
    /// Full-scale point actually used, honouring the minimum span
    pub fn effective_max_mv(&self) -> f32 {
        self.max_mv.max(self.zero_mv + SIM_UV_MIN_SPAN_MV)
    }

    /// Map a simulated reading to UV index
    pub fn uv_index(&self, mv: f32) -> f32 {
        let zero = self.zero_mv;
        let max = self.effective_max_mv();
        let mv = mv.clamp(zero, max);
        clamp_uvi((mv - zero) * (UVI_SPAN_TOP / (max - zero)))
    }

    /// Restore factory defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn clamp_uvi(uvi: f32) -> f32 {
    uvi.clamp(0.0, UVI_CEILING)
}
