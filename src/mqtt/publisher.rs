//! The seam between translation and transport.

use async_trait::async_trait;

use crate::mqtt::types::PublishResult;

/// Sends one payload to one topic.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: &str) -> PublishResult;
}
