//! Core Traits and Abstractions for SunGuard
//!
//! The controller core is pure logic. Everything that touches a pin, a radio
//! or a clock sits behind one of the traits below, so the same state machines
//! run on the ESP32 firmware, in the host simulation, and under test.
//!
//! ## Module Organization
//!
//! - [`time`] - Time source abstraction
//! - [`hardware`] - Analog front end, climate sensor, button, servo, buzzer,
//!   indicator and delay seams
//! - [`telemetry`] - Remote collector seam
//!
//! ## Design Philosophy
//!
//! - **Static Dispatch**: the controller is generic over `Board`, no vtables
//! - **One Board**: `Board` is the union of all seams, blanket-implemented, so
//!   firmware and tests implement each trait on a single struct
//! - **Infallible Outputs**: actuators cannot report failure; only inputs
//!   (climate sensor, telemetry) return `ControllerResult`

pub mod time;
pub mod hardware;
pub mod telemetry;

pub use time::TimeSource;

pub use hardware::{
    AnalogChannel, AnalogFrontEnd, Board, Buzzer, ClimateReading, ClimateSensor,
    Delay, ModeButton, RgbIndicator, ServoDriver, Validatable,
};

pub use telemetry::{EntryId, TelemetrySink};
