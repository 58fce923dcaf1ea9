//! Broker error definitions.

use thiserror::Error;

/// Errors raised while connecting to the broker.
#[derive(Debug, Error)]
pub enum MqttError {
    /// The event loop failed before the broker acknowledged the session.
    #[error("MQTT connection failed: {0}")]
    Connect(#[from] rumqttc::ConnectionError),

    /// No CONNACK arrived in time.
    #[error("MQTT broker did not acknowledge the connection within {0} seconds")]
    ConnectTimeout(u64),
}

/// Errors surfaced by a single publish.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The client could not hand the message to its event loop.
    #[error("{0}")]
    Client(#[from] rumqttc::ClientError),

    /// The publisher refused the message for another reason.
    #[error("{0}")]
    Rejected(String),
}

/// Result type for publish operations.
pub type PublishResult = Result<(), PublishError>;
