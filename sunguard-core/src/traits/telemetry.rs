//! Remote Collector Seam
//!
//! Connectivity bring-up and reconnection are the link's own business; the
//! controller only asks whether the link is up and hands over one record per
//! interval.

use core::num::NonZeroU32;

use crate::errors::ControllerResult;
use crate::telemetry::TelemetryRecord;

/// Positive identifier the collector assigns to an accepted record
pub type EntryId = NonZeroU32;

/// Outbound telemetry link
pub trait TelemetrySink {
    /// Connectivity precondition for a push attempt
    fn is_connected(&self) -> bool;

    /// Send one record; `Ok` only when the collector returned a positive id
    fn publish(&mut self, record: &TelemetryRecord) -> ControllerResult<EntryId>;
}
