//! Time-Related Constants
//!
//! Periods for the cooperative scheduler. All values are milliseconds on the
//! device's monotonic clock.

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// UV acquisition period (milliseconds).
pub const UV_INTERVAL_MS: u64 = 300;

/// Temperature/humidity acquisition period (milliseconds).
///
/// DHT-class sensors need roughly two seconds between conversions.
pub const CLIMATE_INTERVAL_MS: u64 = 2500;

/// Status line period (milliseconds), independent of acquisition.
pub const STATUS_INTERVAL_MS: u64 = MS_PER_SECOND;

/// Stability window for the mode button (milliseconds).
pub const DEBOUNCE_MS: u64 = 25;

/// Hard floor between telemetry push attempts (milliseconds).
///
/// The public channel service rejects updates closer than 15 s apart.
pub const TELEMETRY_MIN_INTERVAL_MS: u64 = 20_000;
