//! Controller configuration
//!
//! `ControllerConfig::default()` reproduces the shipped firmware exactly.
//! Builders adjust single values; `validate()` rejects combinations that
//! would break a state machine (inverted hysteresis, zero periods, empty
//! bursts) before a `Controller` is built from them.

use crate::actuator::{BurstProfile, MotionProfile};
use crate::constants::actuator::{SERVO_EVENT_DEG, SERVO_MAX_DEG, SERVO_MIN_DEG};
use crate::constants::calibration::{EMA_ALPHA, OVERSAMPLE_REAL, OVERSAMPLE_SIM};
use crate::constants::thresholds::{
    TEMP_ALARM_CLEAR_C, TEMP_ALARM_TRIGGER_C, UVI_CLEAR, UVI_TRIGGER,
};
use crate::constants::time::{
    CLIMATE_INTERVAL_MS, DEBOUNCE_MS, STATUS_INTERVAL_MS, TELEMETRY_MIN_INTERVAL_MS,
    UV_INTERVAL_MS,
};
use crate::errors::{ControllerError, ControllerResult};
use crate::uv::{Calibration, RealUvCalibration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How servo sweeps and buzzer bursts are driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExecutionMode {
    /// One step per tick; the loop stays responsive during motion
    #[default]
    Stepped,
    /// Run to completion inside the command, sleeping on `Delay`
    Blocking,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    pub execution_mode: ExecutionMode,

    // Scheduler periods (ms)
    pub uv_interval_ms: u64,
    pub climate_interval_ms: u64,
    pub status_interval_ms: u64,
    pub debounce_ms: u64,
    pub telemetry_min_interval_ms: u64,

    // Smoothing and sampling
    pub ema_alpha: f32,
    pub oversample_real: u8,
    pub oversample_sim: u8,

    // Hysteresis
    pub uv_trigger: f32,
    pub uv_clear: f32,
    pub temp_trigger_c: f32,
    pub temp_clear_c: f32,

    // Outputs
    pub initial_angle: u8,
    pub event_angle: u8,
    pub motion: MotionProfile,
    pub burst: BurstProfile,
    pub common_anode: bool,

    // Calibration
    pub real_calibration: RealUvCalibration,
    pub sim_calibration: Calibration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Stepped,
            uv_interval_ms: UV_INTERVAL_MS,
            climate_interval_ms: CLIMATE_INTERVAL_MS,
            status_interval_ms: STATUS_INTERVAL_MS,
            debounce_ms: DEBOUNCE_MS,
            telemetry_min_interval_ms: TELEMETRY_MIN_INTERVAL_MS,
            ema_alpha: EMA_ALPHA,
            oversample_real: OVERSAMPLE_REAL,
            oversample_sim: OVERSAMPLE_SIM,
            uv_trigger: UVI_TRIGGER,
            uv_clear: UVI_CLEAR,
            temp_trigger_c: TEMP_ALARM_TRIGGER_C,
            temp_clear_c: TEMP_ALARM_CLEAR_C,
            initial_angle: SERVO_MIN_DEG,
            event_angle: SERVO_EVENT_DEG,
            motion: MotionProfile::default(),
            burst: BurstProfile::default(),
            common_anode: false,
            real_calibration: RealUvCalibration::default(),
            sim_calibration: Calibration::default(),
        }
    }
}

impl ControllerConfig {
    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }

    /// Legacy behaviour: sweeps and bursts block the loop
    pub fn blocking(self) -> Self {
        self.with_execution_mode(ExecutionMode::Blocking)
    }

    pub fn with_uv_thresholds(mut self, trigger: f32, clear: f32) -> Self {
        self.uv_trigger = trigger;
        self.uv_clear = clear;
        self
    }

    pub fn with_temperature_thresholds(mut self, trigger_c: f32, clear_c: f32) -> Self {
        self.temp_trigger_c = trigger_c;
        self.temp_clear_c = clear_c;
        self
    }

    pub fn with_ema_alpha(mut self, alpha: f32) -> Self {
        self.ema_alpha = alpha;
        self
    }

    pub fn with_initial_angle(mut self, degrees: u8) -> Self {
        self.initial_angle = degrees;
        self
    }

    pub fn with_motion(mut self, motion: MotionProfile) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_burst(mut self, burst: BurstProfile) -> Self {
        self.burst = burst;
        self
    }

    pub fn with_common_anode(mut self, common_anode: bool) -> Self {
        self.common_anode = common_anode;
        self
    }

    pub fn with_real_calibration(mut self, calibration: RealUvCalibration) -> Self {
        self.real_calibration = calibration;
        self
    }

    pub fn with_telemetry_interval(mut self, min_interval_ms: u64) -> Self {
        self.telemetry_min_interval_ms = min_interval_ms;
        self
    }

    /// Check every constraint the state machines rely on
    pub fn validate(&self) -> ControllerResult<()> {
        fn invalid(reason: &'static str) -> ControllerResult<()> {
            Err(ControllerError::InvalidConfig { reason })
        }

        if !(self.uv_trigger > self.uv_clear) {
            return invalid("UV trigger must be above UV clear");
        }
        if !(self.temp_trigger_c > self.temp_clear_c) {
            return invalid("temperature trigger must be above temperature clear");
        }
        if !(self.ema_alpha > 0.0 && self.ema_alpha <= 1.0) {
            return invalid("EMA alpha must be in (0, 1]");
        }
        if self.uv_interval_ms == 0
            || self.climate_interval_ms == 0
            || self.status_interval_ms == 0
            || self.telemetry_min_interval_ms == 0
        {
            return invalid("scheduler periods must be non-zero");
        }
        if self.oversample_real == 0 || self.oversample_sim == 0 {
            return invalid("oversampling must take at least one sample");
        }
        if self.motion.step_deg == 0 {
            return invalid("servo step must be at least one degree");
        }
        if self.burst.pulses == 0 {
            return invalid("alarm burst needs at least one pulse");
        }
        if self.initial_angle > SERVO_MAX_DEG || self.event_angle > SERVO_MAX_DEG {
            return invalid("servo angles must be within 0..=180");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ControllerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.execution_mode, ExecutionMode::Stepped);
        assert_eq!(config.uv_interval_ms, 300);
        assert_eq!(config.climate_interval_ms, 2500);
        assert_eq!(config.telemetry_min_interval_ms, 20_000);
    }

    #[test]
    fn rejects_inverted_hysteresis() {
        let config = ControllerConfig::default().with_uv_thresholds(6.0, 8.0);
        assert!(matches!(config.validate(), Err(ControllerError::InvalidConfig { .. })));

        let config = ControllerConfig::default().with_temperature_thresholds(34.0, 34.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_alpha() {
        assert!(ControllerConfig::default().with_ema_alpha(0.0).validate().is_err());
        assert!(ControllerConfig::default().with_ema_alpha(1.5).validate().is_err());
        assert!(ControllerConfig::default().with_ema_alpha(f32::NAN).validate().is_err());
        assert!(ControllerConfig::default().with_ema_alpha(1.0).validate().is_ok());
    }

    #[test]
    fn rejects_empty_burst_and_zero_step() {
        let burst = BurstProfile { pulses: 0, ..BurstProfile::default() };
        assert!(ControllerConfig::default().with_burst(burst).validate().is_err());

        let motion = MotionProfile { step_deg: 0, ..MotionProfile::default() };
        assert!(ControllerConfig::default().with_motion(motion).validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_angle() {
        let config = ControllerConfig::default().with_initial_angle(181);
        assert!(config.validate().is_err());
    }
}
