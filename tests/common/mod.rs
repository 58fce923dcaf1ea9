//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backlight_bridge::config::BridgeConfig;
use backlight_bridge::http::HttpServer;
use backlight_bridge::lifecycle::Shutdown;
use backlight_bridge::mqtt::{PublishError, PublishResult, Publisher};
use tokio::net::TcpListener;

/// Publisher that remembers every message instead of talking to a broker.
#[derive(Default)]
pub struct RecordingPublisher {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingPublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All `(topic, payload)` pairs in publish order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Payloads only, in publish order.
    pub fn payloads(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, p)| p).collect()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, topic: &str, payload: &str) -> PublishResult {
        self.sent
            .lock()
            .unwrap()
            .push((topic.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Publisher whose broker is always gone.
#[allow(dead_code)]
pub struct FailingPublisher;

#[async_trait]
impl Publisher for FailingPublisher {
    async fn publish(&self, _topic: &str, _payload: &str) -> PublishResult {
        Err(PublishError::Rejected("connection to broker lost".into()))
    }
}

/// A bridge running on an ephemeral local port.
pub struct TestBridge {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestBridge {
    /// URL of an endpoint under the default `/sandbox/api` prefix.
    #[allow(dead_code)]
    pub fn api(&self, path: &str) -> String {
        format!("http://{}/sandbox/api{}", self.addr, path)
    }

    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestBridge {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the HTTP side of the bridge with `publisher` in place of the broker.
pub async fn start_bridge(config: BridgeConfig, publisher: Arc<dyn Publisher>) -> TestBridge {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, publisher);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestBridge { addr, shutdown }
}

/// HTTP client without pooling or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
