//! Digital input debouncing
//!
//! Every poll compares the raw level with the last raw level seen. Any change
//! restarts the stability timer. Once the raw level has held for the full
//! window and differs from the committed stable level, it is committed and
//! reported exactly once.
//!
//! ```text
//! raw     ‾‾|_|‾|_|‾|___________________
//! timer     ^ ^ ^ ^ ^ restart on each flip
//! stable  ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|________  committed after window
//! event                          ^ Some(false)
//! ```
//!
//! Bounces faster than the poll rate are invisible; bounces slower than the
//! poll rate but inside the window only push the commit point out.

use crate::time::Timestamp;

/// Debounce state for one digital input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    window_ms: u64,
    raw: bool,
    stable: bool,
    last_change: Timestamp,
}

impl Debouncer {
    /// Input assumed low and stable since time 0
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            raw: false,
            stable: false,
            last_change: 0,
        }
    }

    /// Feed one raw sample; returns the new stable level on a committed change
    pub fn update(&mut self, raw: bool, now: Timestamp) -> Option<bool> {
        if raw != self.raw {
            self.raw = raw;
            self.last_change = now;
        }

        let settled = now.saturating_sub(self.last_change) >= self.window_ms;
        if settled && self.stable != self.raw {
            self.stable = self.raw;
            Some(self.stable)
        } else {
            None
        }
    }

    /// `true` on a committed low-to-high transition
    pub fn rose(&mut self, raw: bool, now: Timestamp) -> bool {
        self.update(raw, now) == Some(true)
    }

    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}
