//! MQTT transport subsystem.
//!
//! # Data Flow
//! ```text
//! ColorTranslator
//!     → publisher.rs (Publisher trait, injected as Arc<dyn Publisher>)
//!     → client.rs (rumqttc AsyncClient, QoS 0, no retain)
//!     → event loop task → broker → device topic
//! ```
//!
//! # Design Decisions
//! - One long-lived connection shared by all requests
//! - Startup fails if the broker never acknowledges the session
//! - Lost connections are logged and re-established by the event loop

pub mod client;
pub mod publisher;
pub mod types;

pub use client::{connect, MqttPublisher};
pub use publisher::Publisher;
pub use types::{MqttError, PublishError, PublishResult};
