//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream video metadata API settings.
    pub youtube: YouTubeConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Trace segment settings.
    pub tracing: TracingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// API credential for the upstream service.
///
/// `Debug` never prints the key itself.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(***)")
        }
    }
}

/// YouTube Data API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// API key sent with every lookup.
    pub api_key: ApiKey,

    /// Base URL of the Data API (without trailing `/videos`).
    pub base_url: String,

    /// Deadline for a single outbound call in milliseconds.
    pub timeout_ms: u64,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Trace segment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Segment name used when the request host is not recognized.
    pub fallback_name: String,

    /// Wildcard pattern of hosts whose name becomes the segment name.
    pub recognized_hosts: String,

    /// Fraction of new traces marked as sampled (0.0 - 1.0).
    pub sample_rate: f64,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            fallback_name: "myApp".to_string(),
            recognized_hosts: "youtube.googleapis.com".to_string(),
            sample_rate: 1.0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("AIzaSecret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.expose(), "AIzaSecret");
        assert_eq!(format!("{:?}", ApiKey::default()), "ApiKey(<unset>)");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [youtube]
            api_key = "k"
            "#,
        )
        .unwrap();

        assert_eq!(config.youtube.api_key.expose(), "k");
        assert_eq!(config.youtube.timeout_ms, 5_000);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.tracing.fallback_name, "myApp");
    }
}
