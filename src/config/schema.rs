//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// HTTP listener configuration (bind address, API prefix).
    pub listener: ListenerConfig,

    /// MQTT broker connection settings.
    pub mqtt: MqttConfig,

    /// Color translation settings.
    pub bridge: TranslatorConfig,

    /// Cross-origin settings for browser callers.
    pub cors: CorsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Overridden by the `PORT` environment variable.
    pub port: u16,

    /// Path prefix the color endpoints are mounted under.
    pub base_path: String,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl ListenerConfig {
    /// The `host:port` string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9009,
            base_path: "/sandbox/api".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// MQTT broker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MqttConfig {
    /// Broker hostname.
    pub host: String,

    /// Broker port.
    pub port: u16,

    /// Client identifier. A random one is generated when unset.
    pub client_id: Option<String>,

    /// Topic every command is published to.
    pub topic: String,

    /// Optional username; the connection is anonymous without it.
    pub username: Option<String>,

    /// Optional password, only used together with `username`.
    pub password: Option<String>,

    /// MQTT keep-alive interval in seconds.
    pub keep_alive_secs: u64,

    /// How long startup waits for the first CONNACK.
    pub connect_timeout_secs: u64,

    /// Pause between event loop polls after a connection error.
    pub reconnect_delay_secs: u64,

    /// Capacity of the client request channel.
    pub channel_capacity: usize,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "mqtt.bamdad.dev".to_string(),
            port: 1883,
            client_id: None,
            topic: "cmd/backlight1".to_string(),
            username: None,
            password: None,
            keep_alive_secs: 30,
            connect_timeout_secs: 10,
            reconnect_delay_secs: 3,
            channel_capacity: 64,
        }
    }
}

/// What to do with a color name that is not in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownColorPolicy {
    /// Publish nothing and report success.
    #[default]
    Ignore,
    /// Publish nothing and answer with a client error.
    Reject,
}

/// Color translation configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Handling of color names missing from the palette.
    pub unknown_colors: UnknownColorPolicy,

    /// Extra palette entries, or overrides of the built-in ones.
    pub palette: BTreeMap<String, [u32; 3]>,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable the CORS layer.
    pub enabled: bool,

    /// Send `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,

    /// Request headers browsers may send.
    pub allowed_headers: Vec<String>,

    /// Methods browsers may use.
    pub allowed_methods: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_credentials: true,
            allowed_headers: [
                "Origin",
                "Content-Length",
                "Content-Type",
                "X-Screen-Height",
                "X-Screen-Width",
                "Authorization",
            ]
            .iter()
            .map(|h| h.to_string())
            .collect(),
            allowed_methods: ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

/// Timeout configuration.
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

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins over it.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:9009");
        assert_eq!(config.listener.base_path, "/sandbox/api");
        assert_eq!(config.mqtt.host, "mqtt.bamdad.dev");
        assert_eq!(config.mqtt.port, 1883);
        assert_eq!(config.mqtt.topic, "cmd/backlight1");
        assert!(config.mqtt.username.is_none());
        assert_eq!(config.bridge.unknown_colors, UnknownColorPolicy::Ignore);
        assert!(config.cors.allow_credentials);
        assert_eq!(config.cors.allowed_headers.len(), 6);
    }

    #[test]
    fn test_partial_toml() {
        let config: BridgeConfig = toml::from_str(
            r#"
            [listener]
            port = 8080

            [mqtt]
            host = "localhost"
            username = "emqx"
            password = "public"

            [bridge]
            unknown_colors = "reject"

            [bridge.palette]
            white = [1020, 1020, 1020]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.mqtt.host, "localhost");
        assert_eq!(config.mqtt.port, 1883);
        assert_eq!(config.mqtt.username.as_deref(), Some("emqx"));
        assert_eq!(config.bridge.unknown_colors, UnknownColorPolicy::Reject);
        assert_eq!(config.bridge.palette.get("white"), Some(&[1020, 1020, 1020]));
    }
}
