//! Human-readable 1 Hz status line
//!
//! `SIM=ON | Risk=CAUTION | T=30.1 RH=55.0 HI=33.4 | UV=812 mV (UVI=2.71) | Servo=0`

use core::fmt;

use crate::risk::RiskLevel;
use crate::sample::{Mode, Sample};

/// Snapshot of everything the status line shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusLine {
    pub mode: Mode,
    pub risk: RiskLevel,
    pub sample: Sample,
    pub servo_angle: u8,
    /// A UV event is holding the servo
    pub hold: bool,
}

struct OrNa(Option<f32>);

impl fmt::Display for OrNa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.1}", v),
            None => f.write_str("N/A"),
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SIM={} | Risk={} | T={} RH={} HI={} | UV={:.0} mV (UVI={:.2}) | Servo={}{}",
            if self.mode.is_simulated() { "ON" } else { "OFF" },
            self.risk,
            OrNa(self.sample.temperature()),
            OrNa(self.sample.humidity()),
            OrNa(self.sample.heat_index()),
            self.sample.uv_millivolts,
            self.sample.uv_index,
            self.servo_angle,
            if self.hold { " (HOLD)" } else { "" },
        )
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::heat::Climate;

    #[test]
    fn unknown_climate_prints_na() {
        let line = StatusLine {
            mode: Mode::Real,
            risk: RiskLevel::Normal,
            sample: Sample::default().with_uv(812.4, 2.71, 0),
            servo_angle: 0,
            hold: false,
        };
        assert_eq!(
            line.to_string(),
            "SIM=OFF | Risk=NORMAL | T=N/A RH=N/A HI=N/A | UV=812 mV (UVI=2.71) | Servo=0"
        );
    }

    #[test]
    fn hold_marker_while_event_active() {
        let climate = Climate { temperature_c: 30.0, humidity_pct: 55.0, heat_index_c: 33.44 };
        let line = StatusLine {
            mode: Mode::Simulated,
            risk: RiskLevel::Warning,
            sample: Sample::default().with_climate(Some(climate), 0).with_uv(2100.0, 7.0, 0),
            servo_angle: 180,
            hold: true,
        };
        assert_eq!(
            line.to_string(),
            "SIM=ON | Risk=WARNING | T=30.0 RH=55.0 HI=33.4 | UV=2100 mV (UVI=7.00) | Servo=180 (HOLD)"
        );
    }
}
