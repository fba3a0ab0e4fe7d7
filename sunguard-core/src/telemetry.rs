//! Rate-limited telemetry publishing
//!
//! The publisher is a hard floor on request rate, not a scheduler: a push is
//! attempted when the link reports connected and at least the minimum
//! interval has passed since the previous *attempt*. The gate advances on
//! every attempt regardless of outcome, so a collector that keeps rejecting
//! never causes a request storm. Rejections are logged and counted; the next
//! try is the next natural interval.
//!
//! ```text
//! poll(now) ──▶ gate due? ──no──▶ NotDue
//!                  │yes
//!                  ▼
//!              connected? ──no──▶ Offline        (gate untouched)
//!                  │yes
//!                  ▼
//!            gate fires, publish ──▶ Accepted(id) | Rejected(err)
//! ```

use heapless::Vec;

use crate::errors::ControllerError;
use crate::risk::RiskLevel;
use crate::sample::{Mode, Sample};
use crate::time::{Interval, Timestamp};
use crate::traits::{EntryId, TelemetrySink};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of numbered fields in one record
pub const FIELD_COUNT: usize = 8;

/// One push worth of fused state
///
/// Unknown climate values are `None` and are omitted on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryRecord {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub temperature: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub humidity: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub heat_index: Option<f32>,
    pub uv_index: f32,
    pub uv_millivolts: f32,
    pub risk: RiskLevel,
    pub servo_angle: u8,
    pub simulated: bool,
}

/// Value of one numbered field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Sent with two decimals
    Float(f32),
    /// Sent as a bare integer
    Int(i32),
}

impl TelemetryRecord {
    pub fn new(sample: &Sample, risk: RiskLevel, servo_angle: u8, mode: Mode) -> Self {
        Self {
            temperature: sample.temperature(),
            humidity: sample.humidity(),
            heat_index: sample.heat_index(),
            uv_index: sample.uv_index,
            uv_millivolts: sample.uv_millivolts,
            risk,
            servo_angle,
            simulated: mode.is_simulated(),
        }
    }

    /// Present fields as `(field number, value)`, numbered 1..=8
    pub fn fields(&self) -> Vec<(u8, FieldValue), FIELD_COUNT> {
        let slots = [
            self.temperature.map(FieldValue::Float),
            self.humidity.map(FieldValue::Float),
            self.heat_index.map(FieldValue::Float),
            Some(FieldValue::Float(self.uv_index)),
            Some(FieldValue::Float(self.uv_millivolts)),
            Some(FieldValue::Int(self.risk.as_u8() as i32)),
            Some(FieldValue::Int(self.servo_angle as i32)),
            Some(FieldValue::Int(self.simulated as i32)),
        ];

        let mut fields = Vec::new();
        for (n, slot) in (1u8..).zip(slots) {
            if let Some(value) = slot {
                // Capacity equals the slot count
                let _ = fields.push((n, value));
            }
        }
        fields
    }
}

/// Result of one `poll`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PublishOutcome {
    /// Minimum interval not yet elapsed
    NotDue,
    /// Link down; skipped without consuming the interval
    Offline,
    /// Collector stored the record
    Accepted(EntryId),
    /// Attempt made and failed; no retry before the next interval
    Rejected(ControllerError),
}

impl PublishOutcome {
    /// Whether a request actually went out
    pub fn attempted(&self) -> bool {
        matches!(self, PublishOutcome::Accepted(_) | PublishOutcome::Rejected(_))
    }
}

/// Running counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PublishStats {
    pub attempts: u32,
    pub accepted: u32,
    pub rejected: u32,
    pub skipped_offline: u32,
    pub last_attempt_at: Option<Timestamp>,
}

/// Hard-floor rate limiter in front of a `TelemetrySink`
#[derive(Debug, Clone, Copy)]
pub struct TelemetryPublisher {
    gate: Interval,
    stats: PublishStats,
}

impl TelemetryPublisher {
    /// First attempt allowed one full interval after `boot`
    pub fn new(min_interval_ms: u64, boot: Timestamp) -> Self {
        Self {
            gate: Interval::starting_at(min_interval_ms, boot),
            stats: PublishStats::default(),
        }
    }

    pub fn min_interval_ms(&self) -> u64 {
        self.gate.period_ms()
    }

    pub fn stats(&self) -> &PublishStats {
        &self.stats
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.gate.is_due(now)
    }

    /// Attempt a push if the floor and the link allow it
    pub fn poll<S: TelemetrySink + ?Sized>(
        &mut self,
        now: Timestamp,
        record: &TelemetryRecord,
        sink: &mut S,
    ) -> PublishOutcome {
        if !self.gate.is_due(now) {
            return PublishOutcome::NotDue;
        }
        if !sink.is_connected() {
            self.stats.skipped_offline = self.stats.skipped_offline.saturating_add(1);
            log_debug!("Telemetry skipped: link offline");
            return PublishOutcome::Offline;
        }

        self.gate.tick(now);
        self.stats.attempts = self.stats.attempts.saturating_add(1);
        self.stats.last_attempt_at = Some(now);

        match sink.publish(record) {
            Ok(id) => {
                self.stats.accepted = self.stats.accepted.saturating_add(1);
                log_info!("Telemetry ok id={}", id.get());
                PublishOutcome::Accepted(id)
            }
            Err(err) => {
                self.stats.rejected = self.stats.rejected.saturating_add(1);
                log_warn!("Telemetry rejected: {}", err);
                PublishOutcome::Rejected(err)
            }
        }
    }
}
