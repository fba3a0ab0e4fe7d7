//! HTTP channel-update client
//!
//! One GET per record, no retries, no batching. The response body is a bare
//! JSON integer: a positive entry id means the update was stored, `0` means
//! the collector refused it.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use sunguard_core::telemetry::{FieldValue, TelemetryRecord};

use crate::{ConnectionStats, ConnectorError};

#[cfg(feature = "http")]
use sunguard_core::{
    traits::{EntryId, TelemetrySink},
    ControllerError, ControllerResult,
};

/// Public ThingSpeak endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.thingspeak.com";

/// Channel update configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThingSpeakConfig {
    /// Collector base URL, without the `/update` path
    pub base_url: String,
    /// Channel write key
    pub api_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("SunGuard/{}", env!("CARGO_PKG_VERSION"))
}

impl ThingSpeakConfig {
    /// Configuration for the public endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Load from a JSON document; missing optional keys take defaults
    pub fn from_json(json: &str) -> Result<Self, ConnectorError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConnectorError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Point at a different collector
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full update endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/update", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<(), ConnectorError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConnectorError::ConfigError(
                "Base URL must start with http:// or https://".into(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConnectorError::ConfigError("API key is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConnectorError::ConfigError("Timeout must be non-zero".into()));
        }
        Ok(())
    }
}

/// Query pairs for the present fields, in field order
pub fn field_pairs(record: &TelemetryRecord) -> Vec<(String, String)> {
    record
        .fields()
        .iter()
        .map(|(n, value)| {
            let text = match value {
                FieldValue::Float(v) => format!("{:.2}", v),
                FieldValue::Int(i) => i.to_string(),
            };
            (format!("field{}", n), text)
        })
        .collect()
}

/// Interpret a response body as an entry id
pub fn parse_entry_id(body: &str) -> Result<u32, ConnectorError> {
    let id: i64 = serde_json::from_str(body.trim())
        .map_err(|_| ConnectorError::InvalidResponse(body.trim().to_string()))?;
    if id > 0 {
        u32::try_from(id).map_err(|_| ConnectorError::InvalidResponse(id.to_string()))
    } else {
        Err(ConnectorError::Rejected(id))
    }
}

/// Channel-update client using the lightweight ureq agent
#[cfg(feature = "http")]
pub struct ThingSpeakClient {
    config: ThingSpeakConfig,
    agent: ureq::Agent,
    link_up: bool,
    stats: ConnectionStats,
}

#[cfg(feature = "http")]
impl ThingSpeakClient {
    pub fn new(config: ThingSpeakConfig) -> Result<Self, ConnectorError> {
        config.validate()?;

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            link_up: true,
            stats: ConnectionStats::default(),
        })
    }

    pub fn config(&self) -> &ThingSpeakConfig {
        &self.config
    }

    /// Report the network link state (Wi-Fi association is managed elsewhere)
    pub fn set_link_up(&mut self, up: bool) {
        self.link_up = up;
    }

    pub fn stats(&self) -> &ConnectionStats {
        &self.stats
    }

    /// Send one update and return the entry id
    pub fn update(&mut self, record: &TelemetryRecord) -> Result<u32, ConnectorError> {
        if !self.link_up {
            return Err(ConnectorError::NotConnected);
        }

        let result = self.send(record);
        match &result {
            Ok(id) => {
                self.stats.messages_sent += 1;
                self.stats.last_entry_id = Some(*id);
                log::info!("TS: ok id={}", id);
            }
            Err(e) => {
                self.stats.messages_failed += 1;
                self.stats.last_error = Some(e.to_string());
                log::warn!("TS: fail {}", e);
            }
        }
        result
    }

    fn send(&self, record: &TelemetryRecord) -> Result<u32, ConnectorError> {
        let mut request = self
            .agent
            .get(&self.config.endpoint())
            .query("api_key", &self.config.api_key);
        for (name, value) in field_pairs(record) {
            request = request.query(&name, &value);
        }

        match request.call() {
            Ok(resp) => {
                let body = resp
                    .into_string()
                    .map_err(|e| ConnectorError::Transport(e.to_string()))?;
                parse_entry_id(&body)
            }
            Err(ureq::Error::Status(status, resp)) => Err(ConnectorError::HttpStatus {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(e)) => Err(ConnectorError::Transport(e.to_string())),
        }
    }
}

#[cfg(feature = "http")]
impl TelemetrySink for ThingSpeakClient {
    fn is_connected(&self) -> bool {
        self.link_up
    }

    fn publish(&mut self, record: &TelemetryRecord) -> ControllerResult<EntryId> {
        let id = self.update(record).map_err(|e| ControllerError::from(&e))?;
        EntryId::new(id).ok_or(ControllerError::TelemetryRejected { status: 200 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunguard_core::{heat::Climate, Mode, RiskLevel, Sample};

    fn record(climate: Option<Climate>) -> TelemetryRecord {
        let sample = Sample::default().with_climate(climate, 0).with_uv(812.25, 2.7, 0);
        TelemetryRecord::new(&sample, RiskLevel::Caution, 90, Mode::Simulated)
    }

    #[test]
    fn test_config_builder() {
        let config = ThingSpeakConfig::new("KEY123")
            .base_url("http://localhost:3000/")
            .timeout_secs(3)
            .user_agent("test");

        assert_eq!(config.endpoint(), "http://localhost:3000/update");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.user_agent, "test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(ThingSpeakConfig::new("KEY").base_url("not-a-url").validate().is_err());
        assert!(ThingSpeakConfig::new("  ").validate().is_err());
        assert!(ThingSpeakConfig::new("KEY").timeout_secs(0).validate().is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config = ThingSpeakConfig::from_json(
            r#"{"base_url": "https://api.thingspeak.com", "api_key": "ABC"}"#,
        )
        .unwrap();
        assert_eq!(config.api_key, "ABC");
        assert_eq!(config.timeout_secs, 10);

        assert!(ThingSpeakConfig::from_json(r#"{"api_key": "ABC"}"#).is_err());
    }

    #[test]
    fn test_field_formatting() {
        let climate = Climate { temperature_c: 29.0, humidity_pct: 48.5, heat_index_c: 30.123 };
        let pairs = field_pairs(&record(Some(climate)));

        let expected = [
            ("field1", "29.00"),
            ("field2", "48.50"),
            ("field3", "30.12"),
            ("field4", "2.70"),
            ("field5", "812.25"),
            ("field6", "1"),
            ("field7", "90"),
            ("field8", "1"),
        ];
        assert_eq!(pairs.len(), expected.len());
        for ((name, value), (exp_name, exp_value)) in pairs.iter().zip(expected) {
            assert_eq!(name, exp_name);
            assert_eq!(value, exp_value);
        }
    }

    #[test]
    fn test_unknown_climate_omitted() {
        let pairs = field_pairs(&record(None));
        let names: Vec<&str> = pairs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["field4", "field5", "field6", "field7", "field8"]);
    }

    #[test]
    fn test_parse_entry_id() {
        assert_eq!(parse_entry_id("1234\n").unwrap(), 1234);
        assert!(matches!(parse_entry_id("0"), Err(ConnectorError::Rejected(0))));
        assert!(matches!(parse_entry_id("-1"), Err(ConnectorError::Rejected(-1))));
        assert!(matches!(parse_entry_id("<html>"), Err(ConnectorError::InvalidResponse(_))));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_offline_link_skips_request() {
        let mut client = ThingSpeakClient::new(ThingSpeakConfig::new("KEY")).unwrap();
        client.set_link_up(false);

        assert!(!client.is_connected());
        assert!(matches!(client.update(&record(None)), Err(ConnectorError::NotConnected)));
        assert_eq!(client.publish(&record(None)), Err(ControllerError::LinkOffline));
        assert_eq!(client.stats().messages_sent, 0);
    }
}
