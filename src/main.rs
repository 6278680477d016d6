//! Key-indexed HTTP forwarding gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                    GATEWAY                           │
//!   Client Request   │  ┌─────────┐   path == "/"   ┌────────────┐          │
//!   ─────────────────┼─▶│  http   │────────────────▶│ management │──┐       │
//!                    │  │ server  │                 └────────────┘  │       │
//!                    │  └────┬────┘                                 ▼       │
//!                    │       │ /key/rest?q          ┌─────────────────────┐ │
//!                    │       ▼                      │     route store     │ │
//!                    │  ┌─────────┐  get(key)       │  memory | json file │ │
//!                    │  │ routing │────────────────▶└─────────────────────┘ │
//!                    │  │ parser  │                                         │
//!                    │  │rewriter │                                         │
//!                    │  └────┬────┘                                         │
//!                    │       ▼                                              │
//!   Client Response  │  ┌─────────┐                                         │
//!   ◀────────────────┼──│upstream │◀──────────────────────────────────────┼──── Target
//!                    │  │forwarder│                                         │
//!                    │  └─────────┘                                         │
//!                    └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use keyed_gateway::config::{load_config, GatewayConfig};
use keyed_gateway::lifecycle;

#[derive(Parser)]
#[command(name = "keyed-gateway")]
#[command(about = "Key-indexed HTTP forwarding gateway", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => load_config(&path)?,
        None => GatewayConfig::default(),
    };

    lifecycle::start(config).await?;
    Ok(())
}
