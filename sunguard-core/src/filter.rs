//! Exponential moving average over raw millivolt readings
//!
//! ```text
//! state = None        -> state = raw            (no start-up transient)
//! state = Some(prev)  -> state = prev + α·(raw − prev)
//! ```
//!
//! Reset is always an explicit external action: the controller clears both
//! filters on a mode switch so the new source starts from its own first
//! sample instead of dragging the old source's history along.

/// Advance `state` by one sample and return the smoothed value
///
/// `state` is `None` until the first sample; the first call returns `raw`
/// exactly.
pub fn smooth(raw: f32, state: &mut Option<f32>, alpha: f32) -> f32 {
    let next = match *state {
        None => raw,
        Some(prev) => prev + alpha * (raw - prev),
    };
    *state = Some(next);
    next
}

/// Owned EMA filter with a fixed weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaFilter {
    alpha: f32,
    state: Option<f32>,
}

impl EmaFilter {
    /// `alpha` is the weight of each new sample, in (0, 1]
    pub const fn new(alpha: f32) -> Self {
        Self { alpha, state: None }
    }

    pub fn update(&mut self, raw: f32) -> f32 {
        smooth(raw, &mut self.state, self.alpha)
    }

    /// Current smoothed value, `None` until the first sample
    pub fn value(&self) -> Option<f32> {
        self.state
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Back to "uninitialized"; the next sample passes through unchanged
    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }
}
