//! backlight-bridge
//!
//! Turns HTTP color requests into `set/<R>/<G>/<B>` commands on an MQTT
//! topic watched by an LED backlight.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │               BACKLIGHT BRIDGE               │
//!   HTTP request      │  ┌────────┐    ┌──────────┐    ┌─────────┐  │
//!   ──────────────────┼─▶│  http  │───▶│  color   │───▶│  mqtt   │──┼──▶ broker ──▶ device
//!   set/change/webhook│  │ router │    │ palette  │    │ client  │  │    cmd/backlight1
//!                     │  └────────┘    └──────────┘    └─────────┘  │
//!   ◀─────────────────┼── "done" / "OK" / 400 / 500                  │
//!                     │                                              │
//!                     │  config · observability · lifecycle          │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use backlight_bridge::config::load_config;
use backlight_bridge::lifecycle;

#[derive(Parser)]
#[command(name = "backlight-bridge")]
#[command(about = "HTTP to MQTT bridge for an LED backlight", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "BACKLIGHT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    lifecycle::run(config).await?;
    Ok(())
}
