//! Servo and Buzzer Parameters

// ===== SERVO =====

/// Lowest commandable servo angle (degrees).
pub const SERVO_MIN_DEG: u8 = 0;

/// Highest commandable servo angle (degrees).
pub const SERVO_MAX_DEG: u8 = 180;

/// Angle the servo moves to while a UV event is active (degrees).
pub const SERVO_EVENT_DEG: u8 = 180;

/// Largest angle change per motion step (degrees).
pub const SERVO_STEP_DEG: u8 = 3;

/// Delay between motion steps (milliseconds).
pub const SERVO_STEP_DELAY_MS: u64 = 12;

/// Hold time after the final step before detaching (milliseconds).
pub const SERVO_SETTLE_MS: u64 = 120;

// ===== BUZZER =====

/// Pulses per temperature alarm burst.
pub const BURST_PULSES: u8 = 5;

/// Buzzer on-time per pulse (milliseconds).
pub const BURST_ON_MS: u64 = 320;

/// Buzzer off-time per pulse (milliseconds).
pub const BURST_OFF_MS: u64 = 120;
