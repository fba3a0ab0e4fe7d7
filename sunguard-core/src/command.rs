//! Operator calibration commands
//!
//! Single characters arriving on the console: `z` sets the simulated zero
//! point, `x` sets the simulated full-scale point, `c` restores defaults.
//! Case is ignored.

use core::convert::TryFrom;

use crate::errors::ControllerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationCommand {
    /// Current smoothed UV millivolts become UV index 0
    SetZero,
    /// Current smoothed UV millivolts become UV index 11
    SetMax,
    /// Back to 0..3300 mV
    Reset,
}

impl CalibrationCommand {
    /// Confirmation printed after the command is applied
    pub const fn confirmation(self) -> &'static str {
        match self {
            CalibrationCommand::SetZero => "SIM UV zero set.",
            CalibrationCommand::SetMax => "SIM UV max set.",
            CalibrationCommand::Reset => "SIM UV cal cleared.",
        }
    }
}

impl TryFrom<char> for CalibrationCommand {
    type Error = ControllerError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'z' => Ok(CalibrationCommand::SetZero),
            'x' => Ok(CalibrationCommand::SetMax),
            'c' => Ok(CalibrationCommand::Reset),
            _ => Err(ControllerError::UnknownCommand(c)),
        }
    }
}
