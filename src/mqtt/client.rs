//! Broker connection backed by `rumqttc`.
//!
//! # Responsibilities
//! - Build client options from config (broker, keep-alive, credentials)
//! - Wait for the first CONNACK before the bridge starts serving
//! - Drive the event loop in a background task, logging connection events
//! - Publish commands at QoS 0 without retain

use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::config::MqttConfig;
use crate::mqtt::publisher::Publisher;
use crate::mqtt::types::{MqttError, PublishError, PublishResult};

/// Shared handle for publishing to the broker.
#[derive(Clone, Debug)]
pub struct MqttPublisher {
    client: AsyncClient,
}

impl MqttPublisher {
    pub fn new(client: AsyncClient) -> Self {
        Self { client }
    }

    /// Ask the broker to close the session.
    pub async fn disconnect(&self) -> Result<(), PublishError> {
        self.client.disconnect().await.map_err(PublishError::Client)
    }
}

#[async_trait]
impl Publisher for MqttPublisher {
    async fn publish(&self, topic: &str, payload: &str) -> PublishResult {
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload.as_bytes().to_vec())
            .await
            .map_err(PublishError::Client)
    }
}

/// Build client options from config.
pub fn mqtt_options(config: &MqttConfig) -> MqttOptions {
    let client_id = config
        .client_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("backlight-bridge-{}", uuid::Uuid::new_v4().simple()));

    let mut options = MqttOptions::new(client_id, config.host.clone(), config.port);
    options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
    if let Some(username) = &config.username {
        options.set_credentials(username.clone(), config.password.clone().unwrap_or_default());
    }
    options
}

/// Connect to the broker.
///
/// Returns once the broker has acknowledged the session. The event loop
/// keeps running in the returned task until the client disconnects or every
/// client handle is dropped.
pub async fn connect(config: &MqttConfig) -> Result<(MqttPublisher, JoinHandle<()>), MqttError> {
    let options = mqtt_options(config);
    let broker = format!("{}:{}", config.host, config.port);

    tracing::info!(
        broker = %broker,
        client_id = %options.client_id(),
        "Connecting to MQTT broker"
    );

    let (client, mut eventloop) = AsyncClient::new(options, config.channel_capacity);

    timeout(
        Duration::from_secs(config.connect_timeout_secs),
        wait_for_connack(&mut eventloop),
    )
    .await
    .map_err(|_| MqttError::ConnectTimeout(config.connect_timeout_secs))??;

    tracing::info!(broker = %broker, "Connected");

    let reconnect_delay = Duration::from_secs(config.reconnect_delay_secs);
    let handle = tokio::spawn(drive_event_loop(eventloop, broker, reconnect_delay));

    Ok((MqttPublisher::new(client), handle))
}

async fn wait_for_connack(eventloop: &mut EventLoop) -> Result<(), MqttError> {
    loop {
        if let Event::Incoming(Packet::ConnAck(_)) = eventloop.poll().await? {
            return Ok(());
        }
    }
}

/// Poll the event loop until the session ends.
///
/// Connection errors are logged and polling resumes after `reconnect_delay`;
/// `rumqttc` reconnects on the next poll.
async fn drive_event_loop(mut eventloop: EventLoop, broker: String, reconnect_delay: Duration) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                tracing::info!(broker = %broker, "Reconnected to MQTT broker");
            }
            Ok(Event::Incoming(Packet::Publish(msg))) => {
                tracing::debug!(
                    topic = %msg.topic,
                    payload = %String::from_utf8_lossy(&msg.payload),
                    "Received message"
                );
            }
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                tracing::info!(broker = %broker, "Disconnected from MQTT broker");
                break;
            }
            Ok(_) => {}
            Err(ConnectionError::RequestsDone) => {
                tracing::debug!("All MQTT client handles dropped");
                break;
            }
            Err(e) => {
                tracing::warn!(
                    broker = %broker,
                    error = %e,
                    retry_in = ?reconnect_delay,
                    "Connection lost"
                );
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}
