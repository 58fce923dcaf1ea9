//! Startup orchestration.
//!
//! Order: logging → metrics → broker connection → listener → serve.
//! On the way out the broker session is closed after the HTTP server has
//! drained. Any startup error is fatal.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::BridgeConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_listener;
use crate::mqtt::{self, MqttError};
use crate::observability::{logging, metrics};

/// How long the event loop gets to flush the DISCONNECT.
const DISCONNECT_GRACE: Duration = Duration::from_secs(2);

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Mqtt(#[from] MqttError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Run the bridge until a shutdown signal arrives.
pub async fn run(config: BridgeConfig) -> Result<(), StartupError> {
    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "backlight-bridge starting");
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        base_path = %config.listener.base_path,
        broker = %format!("{}:{}", config.mqtt.host, config.mqtt.port),
        topic = %config.mqtt.topic,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let (publisher, event_loop) = mqtt::connect(&config.mqtt).await?;

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(address = %listener.local_addr()?, "LISTENING");

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, Arc::new(publisher.clone()));
    let served = server.run(listener, shutdown.subscribe()).await;

    if let Err(e) = publisher.disconnect().await {
        tracing::warn!(error = %e, "Failed to send MQTT disconnect");
    }
    if tokio::time::timeout(DISCONNECT_GRACE, event_loop).await.is_err() {
        tracing::warn!("MQTT event loop did not stop in time");
    }

    served?;
    tracing::info!("Shutdown complete");
    Ok(())
}
