//! Telemetry Connectors for SunGuard
//!
//! ## Overview
//!
//! The controller core only knows the `TelemetrySink` trait: "is the link
//! up?" and "publish this record, give me the entry id". This crate supplies
//! the concrete link used by the device, an HTTP channel-update client in the
//! style of ThingSpeak:
//!
//! ```text
//! GET <base>/update?api_key=KEY&field1=29.00&field2=48.00&...&field8=0
//!  -> 200 "1234"   accepted, entry id 1234
//!  -> 200 "0"      rejected (rate limit, bad key)
//!  -> 4xx / 5xx    rejected
//! ```
//!
//! ## Field Map
//!
//! | Field | Value                    | Format      |
//! |-------|--------------------------|-------------|
//! | 1     | temperature (°C)         | 2 decimals  |
//! | 2     | humidity (%)             | 2 decimals  |
//! | 3     | heat index (°C)          | 2 decimals  |
//! | 4     | UV index                 | 2 decimals  |
//! | 5     | UV millivolts            | 2 decimals  |
//! | 6     | combined risk, 0..=3     | integer     |
//! | 7     | servo angle (degrees)    | integer     |
//! | 8     | simulated mode, 0 or 1   | integer     |
//!
//! Unknown climate values are left out of the query, never sent as sentinels.
//!
//! ## Rate Limiting
//!
//! The collector rejects updates closer than 15 s apart. The 20 s floor lives
//! in `sunguard_core::TelemetryPublisher`, not here; this client sends
//! exactly what it is asked to and never retries.
//!
//! ## Example Usage
//!
//! ```no_run
//! use sunguard_connectors::thingspeak::{ThingSpeakClient, ThingSpeakConfig};
//!
//! let config = ThingSpeakConfig::new("YOUR_WRITE_KEY").timeout_secs(5);
//! let mut client = ThingSpeakClient::new(config)?;
//! client.set_link_up(true);
//! // hand `client` to the controller as its TelemetrySink
//! # Ok::<(), sunguard_connectors::ConnectorError>(())
//! ```

pub mod thingspeak;

#[cfg(feature = "http")]
pub use thingspeak::ThingSpeakClient;
pub use thingspeak::ThingSpeakConfig;

use sunguard_core::ControllerError;
use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Not connected")]
    NotConnected,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Update rejected by collector (entry id {0})")]
    Rejected(i64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<&ConnectorError> for ControllerError {
    fn from(err: &ConnectorError) -> Self {
        match err {
            ConnectorError::NotConnected => ControllerError::LinkOffline,
            ConnectorError::Transport(_) => ControllerError::TelemetryRejected { status: -1 },
            ConnectorError::HttpStatus { status, .. } => {
                ControllerError::TelemetryRejected { status: i32::from(*status) }
            }
            ConnectorError::Rejected(_) | ConnectorError::InvalidResponse(_) => {
                ControllerError::TelemetryRejected { status: 200 }
            }
            ConnectorError::ConfigError(_) => ControllerError::InvalidConfig {
                reason: "telemetry connector configuration",
            },
        }
    }
}

/// Connection statistics
#[derive(Debug, Default, Clone)]
pub struct ConnectionStats {
    /// Updates the collector accepted
    pub messages_sent: u64,
    /// Updates that failed for any reason
    pub messages_failed: u64,
    /// Entry id of the last accepted update
    pub last_entry_id: Option<u32>,
    /// Last error message
    pub last_error: Option<String>,
}
