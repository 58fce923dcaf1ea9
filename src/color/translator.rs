//! Translation of color requests into published device commands.

use std::sync::Arc;
use std::time::Instant;

use crate::color::palette::Palette;
use crate::color::types::{ColorError, ColorRequest, Command, TranslateError};
use crate::config::{MqttConfig, TranslatorConfig, UnknownColorPolicy};
use crate::mqtt::Publisher;
use crate::observability::metrics;

/// What happened to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// The command was handed to the broker.
    Published(Command),
    /// The color was unknown and ignored; nothing was sent.
    Ignored,
}

/// Resolves colors through the palette and publishes the result.
#[derive(Clone)]
pub struct ColorTranslator {
    palette: Arc<Palette>,
    publisher: Arc<dyn Publisher>,
    topic: String,
    unknown_colors: UnknownColorPolicy,
}

impl ColorTranslator {
    pub fn new(
        palette: Palette,
        publisher: Arc<dyn Publisher>,
        topic: impl Into<String>,
        unknown_colors: UnknownColorPolicy,
    ) -> Self {
        Self {
            palette: Arc::new(palette),
            publisher,
            topic: topic.into(),
            unknown_colors,
        }
    }

    /// Build a translator from the bridge and broker sections of the config.
    pub fn from_config(
        config: &TranslatorConfig,
        mqtt: &MqttConfig,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self::new(
            Palette::with_entries(&config.palette),
            publisher,
            mqtt.topic.clone(),
            config.unknown_colors,
        )
    }

    /// Resolve a request without publishing anything.
    pub fn translate(&self, request: &ColorRequest) -> Result<Option<Command>, TranslateError> {
        match self.palette.resolve(request)? {
            Some(command) => Ok(Some(command)),
            None => match self.unknown_colors {
                UnknownColorPolicy::Ignore => Ok(None),
                UnknownColorPolicy::Reject => {
                    Err(ColorError::UnknownColor(request.color.clone()).into())
                }
            },
        }
    }

    /// Resolve a request and publish the resulting command.
    ///
    /// Waits for the publisher to accept the message. Publish errors are
    /// returned to the caller; nothing is retried.
    pub async fn apply(&self, request: &ColorRequest) -> Result<Translation, TranslateError> {
        let command = match self.translate(request)? {
            Some(command) => command,
            None => {
                tracing::debug!(color = %request.color, "Ignoring unknown color");
                return Ok(Translation::Ignored);
            }
        };

        let start = Instant::now();
        let result = self.publisher.publish(&self.topic, command.as_str()).await;
        metrics::record_publish(result.is_ok(), start);

        match result {
            Ok(()) => {
                tracing::info!(
                    color = %request.color,
                    command = %command,
                    topic = %self.topic,
                    "Command published"
                );
                Ok(Translation::Published(command))
            }
            Err(e) => {
                tracing::error!(
                    color = %request.color,
                    command = %command,
                    topic = %self.topic,
                    error = %e,
                    "Publish failed"
                );
                Err(e.into())
            }
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl std::fmt::Debug for ColorTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorTranslator")
            .field("topic", &self.topic)
            .field("colors", &self.palette.len())
            .field("unknown_colors", &self.unknown_colors)
            .finish()
    }
}
