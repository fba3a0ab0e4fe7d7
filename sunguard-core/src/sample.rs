//! Fused sensor state and input mode

use core::fmt;

use crate::heat::Climate;
use crate::risk::RiskLevel;
use crate::time::Timestamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which analog sources feed the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Photodiode UV sensor and DHT climate sensor
    #[default]
    Real,
    /// Two potentiometers standing in for both sensors
    Simulated,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Real => Mode::Simulated,
            Mode::Simulated => Mode::Real,
        }
    }

    pub fn is_simulated(self) -> bool {
        self == Mode::Simulated
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Real => "REAL",
            Mode::Simulated => "SIM",
        })
    }
}

/// Latest readings, replaced wholesale on each acquisition
///
/// UV and climate are acquired on separate schedules; each acquisition
/// supersedes its own half and stamps the sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// `None` after a climate sensor failure
    pub climate: Option<Climate>,
    pub uv_index: f32,
    pub uv_millivolts: f32,
    pub timestamp: Timestamp,
}

impl Sample {
    pub fn temperature(&self) -> Option<f32> {
        self.climate.map(|c| c.temperature_c)
    }

    pub fn humidity(&self) -> Option<f32> {
        self.climate.map(|c| c.humidity_pct)
    }

    pub fn heat_index(&self) -> Option<f32> {
        self.climate.map(|c| c.heat_index_c)
    }

    /// Combined UV and heat risk
    pub fn risk(&self) -> RiskLevel {
        RiskLevel::combined(self.uv_index, self.heat_index())
    }

    /// Sample with a new UV reading
    pub fn with_uv(self, uv_millivolts: f32, uv_index: f32, now: Timestamp) -> Self {
        Self { uv_millivolts, uv_index, timestamp: now, ..self }
    }

    /// Sample with a new climate reading, or none after a failure
    pub fn with_climate(self, climate: Option<Climate>, now: Timestamp) -> Self {
        Self { climate, timestamp: now, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_toggle() {
        assert_eq!(Mode::default(), Mode::Real);
        assert_eq!(Mode::Real.toggled(), Mode::Simulated);
        assert!(Mode::Real.toggled().is_simulated());
        assert_eq!(Mode::Simulated.toggled(), Mode::Real);
    }

    #[test]
    fn climate_fields_set_and_cleared_together() {
        let sample = Sample::default().with_climate(Some(Climate::measured(30.0, 40.0)), 10);
        assert_eq!(sample.temperature(), Some(30.0));
        assert_eq!(sample.humidity(), Some(40.0));
        assert!(sample.heat_index().is_some());

        let failed = sample.with_climate(None, 20);
        assert_eq!(failed.temperature(), None);
        assert_eq!(failed.humidity(), None);
        assert_eq!(failed.heat_index(), None);
        assert_eq!(failed.timestamp, 20);
    }

    #[test]
    fn uv_update_keeps_climate() {
        let sample = Sample::default()
            .with_climate(Some(Climate::simulated(3300.0)), 0)
            .with_uv(2069.0, 8.0, 300);
        assert!(sample.climate.is_some());
        assert_eq!(sample.uv_index, 8.0);
        // Simulated 45 °C heat index dominates
        assert_eq!(sample.risk(), RiskLevel::Danger);
    }
}
