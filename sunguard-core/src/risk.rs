//! Risk Classification
//!
//! UV index and heat index are classified independently into an ordinal
//! `RiskLevel`; the combined risk is the maximum of the two. An unknown heat
//! index (sensor failure) contributes `Normal`, so a dead climate sensor can
//! never mask UV risk and never raises risk on its own.
//!
//! | Level   | UV index | Heat index (°C) | Indicator colour |
//! |---------|----------|-----------------|------------------|
//! | Normal  | < 3      | < 32            | (0, 180, 0)      |
//! | Caution | ≥ 3      | ≥ 32            | (200, 130, 0)    |
//! | Warning | ≥ 6      | ≥ 41            | (200, 0, 0)      |
//! | Danger  | ≥ 11     | ≥ 54            | (220, 0, 180)    |

use core::fmt;

use crate::constants::thresholds::{
    HI_CAUTION_C, HI_DANGER_C, HI_WARNING_C, UVI_CAUTION, UVI_DANGER, UVI_WARNING,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered risk level; combination is `max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RiskLevel {
    #[default]
    Normal = 0,
    Caution = 1,
    Warning = 2,
    Danger = 3,
}

impl RiskLevel {
    /// Classify a UV index
    pub fn from_uv(uvi: f32) -> Self {
        if uvi >= UVI_DANGER {
            RiskLevel::Danger
        } else if uvi >= UVI_WARNING {
            RiskLevel::Warning
        } else if uvi >= UVI_CAUTION {
            RiskLevel::Caution
        } else {
            RiskLevel::Normal
        }
    }

    /// Classify a heat index in °C; unknown contributes `Normal`
    pub fn from_heat_index(hi: Option<f32>) -> Self {
        match hi {
            Some(hi) if hi >= HI_DANGER_C => RiskLevel::Danger,
            Some(hi) if hi >= HI_WARNING_C => RiskLevel::Warning,
            Some(hi) if hi >= HI_CAUTION_C => RiskLevel::Caution,
            _ => RiskLevel::Normal,
        }
    }

    /// Combined risk: the greater of the UV and heat contributions
    pub fn combined(uvi: f32, heat_index: Option<f32>) -> Self {
        Self::from_uv(uvi).max(Self::from_heat_index(heat_index))
    }

    /// Telemetry encoding, 0..=3
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Normal => "NORMAL",
            RiskLevel::Caution => "CAUTION",
            RiskLevel::Warning => "WARNING",
            RiskLevel::Danger => "DANGER",
        }
    }

    /// Indicator colour for this level
    pub const fn color(self) -> Rgb {
        match self {
            RiskLevel::Normal => Rgb::new(0, 180, 0),
            RiskLevel::Caution => Rgb::new(200, 130, 0),
            RiskLevel::Warning => Rgb::new(200, 0, 0),
            RiskLevel::Danger => Rgb::new(220, 0, 180),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 8-bit RGB duty cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel inversion for common-anode LEDs
    pub const fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_bands() {
        assert_eq!(RiskLevel::from_uv(0.0), RiskLevel::Normal);
        assert_eq!(RiskLevel::from_uv(2.99), RiskLevel::Normal);
        assert_eq!(RiskLevel::from_uv(3.0), RiskLevel::Caution);
        assert_eq!(RiskLevel::from_uv(6.0), RiskLevel::Warning);
        assert_eq!(RiskLevel::from_uv(10.9), RiskLevel::Warning);
        assert_eq!(RiskLevel::from_uv(11.0), RiskLevel::Danger);
        assert_eq!(RiskLevel::from_uv(12.5), RiskLevel::Danger);
    }

    #[test]
    fn heat_bands() {
        assert_eq!(RiskLevel::from_heat_index(None), RiskLevel::Normal);
        assert_eq!(RiskLevel::from_heat_index(Some(31.9)), RiskLevel::Normal);
        assert_eq!(RiskLevel::from_heat_index(Some(32.0)), RiskLevel::Caution);
        assert_eq!(RiskLevel::from_heat_index(Some(41.0)), RiskLevel::Warning);
        assert_eq!(RiskLevel::from_heat_index(Some(54.0)), RiskLevel::Danger);
    }

    #[test]
    fn combined_takes_the_worse() {
        assert_eq!(RiskLevel::combined(1.0, Some(45.0)), RiskLevel::Warning);
        assert_eq!(RiskLevel::combined(11.5, Some(20.0)), RiskLevel::Danger);
        assert_eq!(RiskLevel::combined(4.0, None), RiskLevel::Caution);
    }

    #[test]
    fn ordering_and_encoding() {
        assert!(RiskLevel::Normal < RiskLevel::Caution);
        assert!(RiskLevel::Caution < RiskLevel::Warning);
        assert!(RiskLevel::Warning < RiskLevel::Danger);
        assert_eq!(RiskLevel::Danger.as_u8(), 3);
    }

    #[test]
    fn colors() {
        assert_eq!(RiskLevel::Normal.color(), Rgb::new(0, 180, 0));
        assert_eq!(RiskLevel::Danger.color().inverted(), Rgb::new(35, 255, 75));
    }
}
