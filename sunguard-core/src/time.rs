//! Time management for the control loop
//!
//! The controller never reads a clock itself: every operation takes `now` as
//! an argument, so the same code runs against a hardware tick counter or a
//! hand-driven test clock.
//!
//! - `TimeSource` implementations produce `now`
//! - `Interval` turns `now` into "is this periodic job due?"

pub use crate::traits::TimeSource;

/// Timestamp in milliseconds since device boot
pub type Timestamp = u64;

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Periodic job timer for the cooperative scheduler
///
/// The first call to `tick` is always due; afterwards a job is due once at
/// least `period_ms` has passed since the last time it fired.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period_ms: u64,
    last_fired: Option<Timestamp>,
}

impl Interval {
    pub const fn new(period_ms: u64) -> Self {
        Self { period_ms, last_fired: None }
    }

    /// Interval whose first firing is one full period after `start`
    pub const fn starting_at(period_ms: u64, start: Timestamp) -> Self {
        Self { period_ms, last_fired: Some(start) }
    }

    /// Returns true and records `now` if the job is due
    pub fn tick(&mut self, now: Timestamp) -> bool {
        if self.is_due(now) {
            self.last_fired = Some(now);
            true
        } else {
            false
        }
    }

    /// Check without recording
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.period_ms,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn last_fired(&self) -> Option<Timestamp> {
        self.last_fired
    }

    /// Forget the last firing so the next `tick` is due immediately
    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);
    }

    #[test]
    fn interval_first_tick_is_due() {
        let mut interval = Interval::new(300);
        assert!(interval.tick(0));
        assert!(!interval.tick(299));
        assert!(interval.tick(300));
        assert!(!interval.tick(500));
        assert!(interval.tick(601));
    }

    #[test]
    fn interval_starting_at_waits_full_period() {
        let mut interval = Interval::starting_at(20_000, 0);
        assert!(!interval.tick(19_999));
        assert!(interval.tick(20_000));
    }

    #[test]
    fn interval_tolerates_clock_going_backwards() {
        let mut interval = Interval::new(100);
        assert!(interval.tick(1000));
        // saturating_sub keeps a backwards step from looking "due"
        assert!(!interval.tick(900));
    }
}
