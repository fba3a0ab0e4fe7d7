//! Sensor fusion and alarm core for SunGuard
//!
//! Reads UV exposure and temperature/humidity (from real sensors or from a
//! pair of potentiometers), classifies combined risk, and drives a servo, a
//! buzzer, an RGB indicator and a rate-limited telemetry link.
//!
//! Key constraints:
//! - Single-threaded cooperative loop, no allocation
//! - Runs `no_std` on the ESP32; hardware sits behind `traits`
//! - Hysteresis on every alarm so nothing chatters at a boundary
//!
//! ```
//! use sunguard_core::traits::Board;
//! use sunguard_core::{Controller, ControllerConfig, ControllerResult};
//!
//! fn run<B: Board>(board: &mut B) -> ControllerResult<()> {
//!     let mut controller = Controller::new(ControllerConfig::default(), 0)?;
//!
//!     for now in (0..10_000).step_by(10) {
//!         let report = controller.tick(now, board);
//!         if let Some(line) = report.status {
//!             println!("{line}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod actuator;
pub mod command;
pub mod config;
pub mod constants;
pub mod controller;
pub mod debounce;
pub mod errors;
pub mod filter;
pub mod heat;
pub mod risk;
pub mod sample;
pub mod status;
pub mod telemetry;
pub mod temp_alarm;
pub mod time;
pub mod traits;
pub mod uv;
pub mod uv_event;

// Public API
pub use command::CalibrationCommand;
pub use config::{ControllerConfig, ExecutionMode};
pub use controller::{Controller, TickReport};
pub use errors::{ControllerError, ControllerResult};
pub use risk::{RiskLevel, Rgb};
pub use sample::{Mode, Sample};
pub use status::StatusLine;
pub use telemetry::{PublishOutcome, TelemetryPublisher, TelemetryRecord};
pub use uv_event::{UvEventState, UvTransition};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
