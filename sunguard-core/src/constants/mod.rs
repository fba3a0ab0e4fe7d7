//! Constants for SunGuard Core
//!
//! Every threshold, period and calibration default used by the controller is
//! defined here with its unit in the name. `ControllerConfig::default()` is
//! built entirely from these values.
//!
//! ## Organization
//!
//! - **Thresholds**: risk bands and hysteresis trigger/clear levels
//! - **Time**: acquisition, status, debounce and telemetry periods
//! - **Calibration**: millivolt-to-UV-index mappings and simulated climate
//! - **Actuator**: servo motion and buzzer burst shapes

/// Risk bands and hysteresis thresholds.
pub mod thresholds;

/// Scheduler periods and timing windows.
pub mod time;

/// Analog calibration defaults for real and simulated sensors.
pub mod calibration;

/// Servo motion and buzzer burst parameters.
pub mod actuator;

pub use thresholds::{
    UVI_TRIGGER, UVI_CLEAR, TEMP_ALARM_TRIGGER_C, TEMP_ALARM_CLEAR_C,
};

pub use time::{
    MS_PER_SECOND, UV_INTERVAL_MS, CLIMATE_INTERVAL_MS, STATUS_INTERVAL_MS,
    DEBOUNCE_MS, TELEMETRY_MIN_INTERVAL_MS,
};

pub use calibration::{
    UV_REAL_ZERO_MV, UV_REAL_UVI11_MV, SIM_UV_ZERO_MV, SIM_UV_MAX_MV,
    UVI_CEILING, EMA_ALPHA,
};

pub use actuator::{SERVO_MIN_DEG, SERVO_MAX_DEG, SERVO_EVENT_DEG};
