//! Error Types for the Controller Core
//!
//! ## Design Philosophy
//!
//! The controller runs forever on a single thread and no condition it meets is
//! fatal. Errors therefore exist to be *reported*, not to unwind the loop:
//!
//! 1. **Small Size**: Every variant carries inline data only, so errors can be
//!    returned from hardware seams and kept in counters without allocation.
//!
//! 2. **Copy Semantics**: Errors are `Copy` so a failed read can be logged and
//!    stored in the same statement.
//!
//! 3. **Degrade, Don't Halt**: Each category maps to a graceful fallback in
//!    the control loop.
//!
//! ## Error Categories
//!
//! ### Sensor Failures
//! - `SensorUnavailable`: the climate sensor did not answer. Temperature,
//!   humidity and heat index become unknown for that cycle.
//! - `InvalidReading`: the sensor answered with NaN or infinity.
//!
//! ### Operator Input
//! - `UnknownCommand`: a calibration character that is not `z`, `x` or `c`.
//!
//! ### Telemetry
//! - `LinkOffline`: connectivity precondition does not hold; push skipped.
//! - `TelemetryRejected`: the collector did not hand back a positive entry id.
//!
//! ### Configuration
//! - `InvalidConfig`: a `ControllerConfig` failed `validate()`.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use sunguard_core::ControllerError;
//!
//! fn on_climate_failure(err: ControllerError) {
//!     match err {
//!         ControllerError::SensorUnavailable { .. }
//!         | ControllerError::InvalidReading => {
//!             // Heat index becomes unknown and contributes Normal risk
//!         }
//!         _ => {}
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Controller errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ControllerError {
    /// Climate sensor did not produce a reading this cycle
    #[error("Sensor unavailable: {reason}")]
    SensorUnavailable {
        /// Driver-provided cause (timeout, checksum, ...)
        reason: &'static str,
    },

    /// Sensor produced a value that is not a finite number
    #[error("Invalid reading: not a valid number")]
    InvalidReading,

    /// Calibration command character not recognised
    #[error("Unknown calibration command '{0}'")]
    UnknownCommand(char),

    /// Connectivity precondition for telemetry does not hold
    #[error("Telemetry link offline")]
    LinkOffline,

    /// Collector answered without a positive entry id
    #[error("Telemetry rejected (status {status})")]
    TelemetryRejected {
        /// Transport status code, or a negative value for local failures
        status: i32,
    },

    /// Configuration failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which constraint was violated
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ControllerError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SensorUnavailable { reason } =>
                defmt::write!(fmt, "Sensor unavailable: {}", reason),
            Self::InvalidReading =>
                defmt::write!(fmt, "Invalid reading"),
            Self::UnknownCommand(c) =>
                defmt::write!(fmt, "Unknown command {}", c),
            Self::LinkOffline =>
                defmt::write!(fmt, "Telemetry link offline"),
            Self::TelemetryRejected { status } =>
                defmt::write!(fmt, "Telemetry rejected ({})", status),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn errors_stay_small() {
        assert!(core::mem::size_of::<ControllerError>() <= 24);
    }

    #[test]
    fn display_messages() {
        let err = ControllerError::UnknownCommand('q');
        assert_eq!(err.to_string(), "Unknown calibration command 'q'");

        let err = ControllerError::TelemetryRejected { status: 500 };
        assert_eq!(err.to_string(), "Telemetry rejected (status 500)");
    }
}
