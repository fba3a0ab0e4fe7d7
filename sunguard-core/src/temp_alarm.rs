//! Temperature alarm latch
//!
//! Fires one audible burst per upward crossing of the trigger temperature.
//! While Active the burst is never repeated; dropping to the clear
//! temperature re-arms silently. An unknown temperature is "no new
//! information" and causes no transition.

use crate::constants::thresholds::{TEMP_ALARM_CLEAR_C, TEMP_ALARM_TRIGGER_C};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TempAlarmState {
    #[default]
    Idle,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureAlarm {
    trigger_c: f32,
    clear_c: f32,
    state: TempAlarmState,
}

impl Default for TemperatureAlarm {
    fn default() -> Self {
        Self::new(TEMP_ALARM_TRIGGER_C, TEMP_ALARM_CLEAR_C)
    }
}

impl TemperatureAlarm {
    pub fn new(trigger_c: f32, clear_c: f32) -> Self {
        Self {
            trigger_c,
            clear_c,
            state: TempAlarmState::Idle,
        }
    }

    pub fn state(&self) -> TempAlarmState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TempAlarmState::Active
    }

    /// Feed one temperature; returns true when a burst must be sounded
    pub fn update(&mut self, temperature_c: Option<f32>) -> bool {
        let Some(t) = temperature_c else {
            return false;
        };

        match self.state {
            TempAlarmState::Idle if t >= self.trigger_c => {
                self.state = TempAlarmState::Active;
                log_warn!("High temperature alarm at {} C", t);
                true
            }
            TempAlarmState::Active if t <= self.clear_c => {
                self.state = TempAlarmState::Idle;
                log_info!("High temperature alarm re-armed at {} C", t);
                false
            }
            _ => false,
        }
    }
}
