//! Configuration validation.
//!
//! Serde handles syntax; this module checks values against what the
//! listener, the broker and the palette can actually work with. All
//! problems are reported at once, not just the first.

use std::net::SocketAddr;

use axum::http::{HeaderName, Method};

use crate::color::CUSTOM;
use crate::config::schema::BridgeConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::new("listener.port", "must be non-zero"));
    }
    let base = &config.listener.base_path;
    if !base.is_empty() && (!base.starts_with('/') || base.ends_with('/')) {
        errors.push(ValidationError::new(
            "listener.base_path",
            "must start with '/' and must not end with '/'",
        ));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::new("listener.max_body_bytes", "must be non-zero"));
    }

    if config.mqtt.host.trim().is_empty() {
        errors.push(ValidationError::new("mqtt.host", "must not be empty"));
    }
    if config.mqtt.port == 0 {
        errors.push(ValidationError::new("mqtt.port", "must be non-zero"));
    }
    let topic = &config.mqtt.topic;
    if topic.is_empty() {
        errors.push(ValidationError::new("mqtt.topic", "must not be empty"));
    } else if topic.contains('+') || topic.contains('#') {
        errors.push(ValidationError::new(
            "mqtt.topic",
            "wildcards are not allowed in a publish topic",
        ));
    }
    if config.mqtt.password.is_some() && config.mqtt.username.is_none() {
        errors.push(ValidationError::new("mqtt.password", "requires mqtt.username"));
    }
    if config.mqtt.channel_capacity == 0 {
        errors.push(ValidationError::new("mqtt.channel_capacity", "must be non-zero"));
    }
    if (1..5).contains(&config.mqtt.keep_alive_secs) {
        errors.push(ValidationError::new(
            "mqtt.keep_alive_secs",
            "must be 0 (disabled) or at least 5",
        ));
    }
    if config.mqtt.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("mqtt.connect_timeout_secs", "must be non-zero"));
    }

    for name in config.bridge.palette.keys() {
        if name.is_empty() {
            errors.push(ValidationError::new("bridge.palette", "color names must not be empty"));
        } else if name == CUSTOM {
            errors.push(ValidationError::new(
                format!("bridge.palette.{}", name),
                "is reserved for raw RGB requests",
            ));
        }
    }

    for header in &config.cors.allowed_headers {
        if HeaderName::from_bytes(header.as_bytes()).is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_headers",
                format!("invalid header name '{}'", header),
            ));
        }
    }
    for method in &config.cors.allowed_methods {
        if Method::from_bytes(method.as_bytes()).is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_methods",
                format!("invalid method '{}'", method),
            ));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be non-zero"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&BridgeConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = BridgeConfig::default();
        config.mqtt.topic = "cmd/#".to_string();
        config.listener.base_path = "sandbox/".to_string();
        config.bridge.palette.insert("custom".to_string(), [1, 2, 3]);

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(errors.len(), 3);
        assert!(fields.contains(&"mqtt.topic"));
        assert!(fields.contains(&"listener.base_path"));
        assert!(fields.contains(&"bridge.palette.custom"));
    }

    #[test]
    fn test_empty_base_path_allowed() {
        let mut config = BridgeConfig::default();
        config.listener.base_path = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_password_without_username() {
        let mut config = BridgeConfig::default();
        config.mqtt.password = Some("public".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "mqtt.password");
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = BridgeConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_cors_header() {
        let mut config = BridgeConfig::default();
        config.cors.allowed_headers.push("Bad Header".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("Bad Header"));
    }
}
