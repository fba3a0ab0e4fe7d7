//! Hardware Seams
//!
//! Pin setup, ADC attenuation, PWM channels and radio bring-up belong to the
//! firmware. The controller only needs the operations below.

use crate::errors::{ControllerError, ControllerResult};
use crate::risk::Rgb;
use crate::traits::telemetry::TelemetrySink;

/// Analog inputs the controller samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Real UV photodiode amplifier
    UvReal,
    /// Potentiometer standing in for the UV sensor
    UvSim,
    /// Potentiometer standing in for the temperature sensor
    TempSim,
}

/// Averaged millivolt reads
pub trait AnalogFrontEnd {
    /// Average `samples` conversions on `channel`, returning millivolts
    fn read_millivolts(&mut self, channel: AnalogChannel, samples: u8) -> f32;
}

/// Temperature and humidity pair from the real climate sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    /// Air temperature (°C)
    pub temperature_c: f32,
    /// Relative humidity (%)
    pub humidity_pct: f32,
}

impl ClimateReading {
    /// Reject readings that are not finite numbers
    pub fn validated(self) -> ControllerResult<Self> {
        if self.temperature_c.is_valid() && self.humidity_pct.is_valid() {
            Ok(self)
        } else {
            Err(ControllerError::InvalidReading)
        }
    }
}

/// Real temperature/humidity sensor (DHT-class)
pub trait ClimateSensor {
    /// Perform one conversion
    fn read_climate(&mut self) -> ControllerResult<ClimateReading>;
}

/// Raw level of the mode toggle input
pub trait ModeButton {
    /// `true` while the button is pressed
    fn is_high(&mut self) -> bool;
}

/// Hobby servo driver with lazy attach
pub trait ServoDriver {
    /// Start emitting PWM
    fn attach(&mut self);
    /// Command an angle in degrees
    fn write_angle(&mut self, degrees: u8);
    /// Stop emitting PWM so the servo stays quiet at rest
    fn detach(&mut self);
}

/// Audible alarm output
pub trait Buzzer {
    fn set_buzzer(&mut self, on: bool);
}

/// RGB status indicator
pub trait RgbIndicator {
    fn set_color(&mut self, color: Rgb);
}

/// Blocking millisecond delay, used only in blocking execution mode
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Everything the controller drives, on one struct
pub trait Board:
    AnalogFrontEnd
    + ClimateSensor
    + ModeButton
    + ServoDriver
    + Buzzer
    + RgbIndicator
    + Delay
    + TelemetrySink
{
}

impl<T> Board for T where
    T: AnalogFrontEnd
        + ClimateSensor
        + ModeButton
        + ServoDriver
        + Buzzer
        + RgbIndicator
        + Delay
        + TelemetrySink
{
}

/// Trait for values that can be checked for physical validity
pub trait Validatable {
    /// Not NaN, not infinite
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
