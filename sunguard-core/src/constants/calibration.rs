//! Analog Calibration Defaults
//!
//! Millivolt figures are after the front end's 11 dB attenuation, i.e. the
//! usable 0..3300 mV range of the ESP32 ADC.

// ===== REAL UV SENSOR =====

/// Real UV sensor output in darkness (mV).
pub const UV_REAL_ZERO_MV: f32 = 120.0;

/// Real UV sensor output at UV index 11 (mV).
pub const UV_REAL_UVI11_MV: f32 = 2800.0;

/// Smallest span the real mapping will divide by (mV).
pub const UV_REAL_MIN_SPAN_MV: f32 = 50.0;

// ===== SIMULATED UV (POTENTIOMETER) =====

/// Default simulated zero point (mV).
pub const SIM_UV_ZERO_MV: f32 = 0.0;

/// Default simulated full-scale point, mapped to UV index 11 (mV).
pub const SIM_UV_MAX_MV: f32 = 3300.0;

/// Minimum simulated span enforced when mapping (mV).
pub const SIM_UV_MIN_SPAN_MV: f32 = 100.0;

// ===== UV INDEX SCALE =====

/// UV index produced at the top of the calibrated span.
pub const UVI_SPAN_TOP: f32 = 11.0;

/// Hard ceiling on mapped UV index, above the nominal 0..11 scale.
pub const UVI_CEILING: f32 = 12.5;

// ===== SIMULATED CLIMATE =====

/// Simulated temperature at 0 mV (°C).
pub const SIM_TEMP_MIN_C: f32 = 15.0;

/// Simulated temperature at full scale (°C).
pub const SIM_TEMP_MAX_C: f32 = 45.0;

/// Full-scale millivolts of the simulated temperature pot.
pub const SIM_TEMP_FULL_SCALE_MV: f32 = 3300.0;

/// Fixed simulated relative humidity (%).
pub const SIM_HUMIDITY_PCT: f32 = 55.0;

// ===== SMOOTHING & OVERSAMPLING =====

/// EMA weight applied to each new simulated reading.
pub const EMA_ALPHA: f32 = 0.25;

/// ADC samples averaged per real UV read.
pub const OVERSAMPLE_REAL: u8 = 16;

/// ADC samples averaged per potentiometer read.
pub const OVERSAMPLE_SIM: u8 = 24;
