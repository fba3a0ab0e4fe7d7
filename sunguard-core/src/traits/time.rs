//! Time Source Abstraction
//!
//! `TimeSource` hides where milliseconds come from:
//!
//! - `FixedTime`: hand-driven clock for tests
//! - firmware: the HAL's boot-relative tick counter

use crate::time::Timestamp;

/// Source of time for the system
///
/// ## Example Implementation
///
/// ```rust
/// use sunguard_core::traits::TimeSource;
/// use sunguard_core::time::Timestamp;
///
/// struct TickCounter {
///     ticks: u64,
/// }
///
/// impl TimeSource for TickCounter {
///     fn now(&self) -> Timestamp {
///         self.ticks
///     }
/// }
/// ```
pub trait TimeSource {
    /// Current timestamp in milliseconds since boot
    fn now(&self) -> Timestamp;
}
