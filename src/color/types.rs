//! Request and command types plus error definitions.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::mqtt::PublishError;

/// Color name that carries its own RGB triplet.
pub const CUSTOM: &str = "custom";

/// Errors that can occur while resolving a color request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// The RGB string did not split into exactly three parts.
    #[error("not enough parameters: expected 3 comma-separated values, got {0}")]
    RgbArity(usize),

    /// A custom color was requested without any RGB triplet.
    #[error("custom color requires an rgb triplet")]
    MissingRgb,

    /// The color is not in the palette and the policy rejects it.
    #[error("unknown color: {0}")]
    UnknownColor(String),
}

/// Errors surfaced by the translator.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
}

/// Ordered red/green/blue values, kept exactly as the caller sent them.
///
/// No numeric or range check is applied; the device is the judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbTriplet {
    pub r: String,
    pub g: String,
    pub b: String,
}

impl RgbTriplet {
    pub fn new(r: impl Into<String>, g: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            r: r.into(),
            g: g.into(),
            b: b.into(),
        }
    }
}

impl FromStr for RgbTriplet {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        match parts.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(ColorError::RgbArity(parts.len())),
        }
    }
}

/// A single color change, built per request and dropped after translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRequest {
    pub color: String,
    pub rgb: Option<RgbTriplet>,
}

impl ColorRequest {
    /// A request for a named palette color.
    pub fn named(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            rgb: None,
        }
    }

    /// A request for a raw RGB triplet.
    pub fn custom(rgb: RgbTriplet) -> Self {
        Self {
            color: CUSTOM.to_string(),
            rgb: Some(rgb),
        }
    }

    /// Build a request, parsing `rgb` only when `color` is `custom`.
    ///
    /// For any other color the RGB string is ignored.
    pub fn parse(color: &str, rgb: Option<&str>) -> Result<Self, ColorError> {
        if color == CUSTOM {
            let rgb: RgbTriplet = rgb.unwrap_or_default().parse()?;
            Ok(Self::custom(rgb))
        } else {
            Ok(Self::named(color))
        }
    }

    pub fn is_custom(&self) -> bool {
        self.color == CUSTOM
    }
}

/// Body of the generic webhook. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookPayload {
    pub key: String,
    pub color: String,
    /// Comma-separated RGB string when `color` is `custom`.
    pub action: String,
}

impl WebhookPayload {
    /// Decode a webhook body, keeping whatever fields are usable.
    ///
    /// Field names match case-insensitively, with an exact match taking
    /// precedence. A field that is not a string is left empty. Every problem
    /// found is returned alongside the payload; a body that is not a JSON
    /// object yields an empty payload.
    pub fn decode(body: &[u8]) -> (Self, Vec<String>) {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => return (Self::default(), vec![e.to_string()]),
        };
        let object = match value {
            Value::Object(object) => object,
            other => {
                return (Self::default(), vec![format!("expected a JSON object, got {}", other)]);
            }
        };

        let mut problems = Vec::new();
        let mut field = |name: &str| match lookup(&object, name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => {
                problems.push(format!("field `{}` must be a string, got {}", name, other));
                String::new()
            }
        };

        let payload = Self {
            key: field("key"),
            color: field("color"),
            action: field("action"),
        };
        (payload, problems)
    }

    /// Turn the payload into a color request.
    pub fn to_request(&self) -> Result<ColorRequest, ColorError> {
        ColorRequest::parse(&self.color, Some(&self.action))
    }
}

fn lookup<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).or_else(|| {
        object
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    })
}

/// The literal text published to the device topic, `set/<R>/<G>/<B>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command(String);

impl Command {
    /// Compose a `set` command from three channel values.
    pub fn set(r: impl fmt::Display, g: impl fmt::Display, b: impl fmt::Display) -> Self {
        Self(format!("set/{}/{}/{}", r, g, b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&RgbTriplet> for Command {
    fn from(rgb: &RgbTriplet) -> Self {
        Command::set(&rgb.r, &rgb.g, &rgb.b)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
