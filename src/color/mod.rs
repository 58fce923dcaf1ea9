//! Color command translation subsystem.
//!
//! # Data Flow
//! ```text
//! ColorRequest (color name, optional RGB triplet)
//!     → palette.rs (table lookup, or verbatim triplet for "custom")
//!     → translator.rs (unknown-color policy, publish, outcome)
//!     → Command "set/<R>/<G>/<B>" on the device topic
//! ```
//!
//! # Design Decisions
//! - One table replaces per-color branches; config can extend it
//! - Triplet values are passed through untouched
//! - Resolution is pure; only `ColorTranslator::apply` touches the broker

pub mod palette;
pub mod translator;
pub mod types;

pub use palette::Palette;
pub use translator::{ColorTranslator, Translation};
pub use types::{
    ColorError, ColorRequest, Command, RgbTriplet, TranslateError, WebhookPayload, CUSTOM,
};
