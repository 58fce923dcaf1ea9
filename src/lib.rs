//! HTTP to MQTT bridge for an LED backlight.

pub mod color;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mqtt;
pub mod observability;

pub use color::{ColorRequest, ColorTranslator, Command, Palette};
pub use config::schema::BridgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mqtt::{MqttPublisher, Publisher};
