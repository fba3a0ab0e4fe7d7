//! Risk Bands and Hysteresis Thresholds
//!
//! Risk bands follow the NOAA-style public categories for UV exposure and
//! apparent temperature. Alarm thresholds come in trigger/clear pairs; the
//! gap between them is the hysteresis band in which no transition happens.

// ===== UV INDEX RISK BANDS =====

/// UV index at or above which risk is at least Caution.
pub const UVI_CAUTION: f32 = 3.0;

/// UV index at or above which risk is at least Warning.
pub const UVI_WARNING: f32 = 6.0;

/// UV index at or above which risk is Danger.
pub const UVI_DANGER: f32 = 11.0;

// ===== HEAT INDEX RISK BANDS (°C) =====

/// Heat index at or above which risk is at least Caution (°C).
pub const HI_CAUTION_C: f32 = 32.0;

/// Heat index at or above which risk is at least Warning (°C).
pub const HI_WARNING_C: f32 = 41.0;

/// Heat index at or above which risk is Danger (°C).
pub const HI_DANGER_C: f32 = 54.0;

// ===== UV EVENT HYSTERESIS =====

/// UV index at or above which the actuator event latches.
pub const UVI_TRIGGER: f32 = 8.0;

/// UV index at or below which a latched event clears.
///
/// Must stay strictly below `UVI_TRIGGER`; the 2.0 UVI gap stops the
/// actuator from chattering at the boundary.
pub const UVI_CLEAR: f32 = 6.0;

// ===== TEMPERATURE ALARM HYSTERESIS =====

/// Temperature at or above which the audible burst fires (°C).
pub const TEMP_ALARM_TRIGGER_C: f32 = 35.0;

/// Temperature at or below which the alarm re-arms (°C).
pub const TEMP_ALARM_CLEAR_C: f32 = 34.0;
