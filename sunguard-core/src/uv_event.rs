//! One-shot UV event latch
//!
//! ```text
//!            uvi ≥ trigger
//!   Idle ───────────────────▶ Active(saved_angle)
//!    ▲                             │
//!    └──── uvi ≤ clear ────────────┘
//!    └──── cancel() (mode switch) ─┘
//! ```
//!
//! Only edges command motion: entering Active moves the actuator to the event
//! angle, leaving it restores the angle saved on entry. Sustained high UV does
//! not re-command anything. Readings inside (clear, trigger) never change
//! state in either direction.
//!
//! The latch is pure: it decides, the caller moves the servo.

use crate::constants::actuator::SERVO_EVENT_DEG;
use crate::constants::thresholds::{UVI_CLEAR, UVI_TRIGGER};

/// Latch state; Active carries the angle to restore on clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UvEventState {
    #[default]
    Idle,
    Active { saved_angle: u8 },
}

/// Motion the caller must perform after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UvTransition {
    /// Event latched; move to `target`
    Entered { saved_angle: u8, target: u8 },
    /// Event cleared by falling UV; return to `restore`
    Cleared { restore: u8 },
    /// Event force-cleared; return to `restore`
    Cancelled { restore: u8 },
}

impl UvTransition {
    /// Angle the actuator must be commanded to
    pub fn target_angle(&self) -> u8 {
        match *self {
            UvTransition::Entered { target, .. } => target,
            UvTransition::Cleared { restore } | UvTransition::Cancelled { restore } => restore,
        }
    }
}

/// Hysteresis latch driving the position actuator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvEventController {
    trigger: f32,
    clear: f32,
    event_angle: u8,
    state: UvEventState,
}

impl Default for UvEventController {
    fn default() -> Self {
        Self::new(UVI_TRIGGER, UVI_CLEAR, SERVO_EVENT_DEG)
    }
}

impl UvEventController {
    /// `clear` must be strictly below `trigger` (checked by config validation)
    pub fn new(trigger: f32, clear: f32, event_angle: u8) -> Self {
        Self {
            trigger,
            clear,
            event_angle,
            state: UvEventState::Idle,
        }
    }

    pub fn state(&self) -> UvEventState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, UvEventState::Active { .. })
    }

    /// Feed one UV index reading
    ///
    /// `current_angle` is the actuator's settled angle, saved on entry.
    pub fn update(&mut self, uvi: f32, current_angle: u8) -> Option<UvTransition> {
        match self.state {
            UvEventState::Idle if uvi >= self.trigger => {
                self.state = UvEventState::Active { saved_angle: current_angle };
                log_info!("UV event: latched at UVI {}, saved angle {}", uvi, current_angle);
                Some(UvTransition::Entered {
                    saved_angle: current_angle,
                    target: self.event_angle,
                })
            }
            UvEventState::Active { saved_angle } if uvi <= self.clear => {
                self.state = UvEventState::Idle;
                log_info!("UV event: cleared at UVI {}, restoring {}", uvi, saved_angle);
                Some(UvTransition::Cleared { restore: saved_angle })
            }
            _ => None,
        }
    }

    /// Force Idle regardless of the reading
    pub fn cancel(&mut self) -> Option<UvTransition> {
        match self.state {
            UvEventState::Active { saved_angle } => {
                self.state = UvEventState::Idle;
                log_info!("UV event: cancelled, restoring {}", saved_angle);
                Some(UvTransition::Cancelled { restore: saved_angle })
            }
            UvEventState::Idle => None,
        }
    }
}
