//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize logging and metrics from configuration
//! - Open the route store and build the outbound client
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};
use crate::store::{open_store, StoreError};

/// Fatal errors raised before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to open route store: {0}")]
    Store(#[from] StoreError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the gateway described by `config` until SIGINT/SIGTERM.
pub async fn start(config: GatewayConfig) -> Result<(), StartupError> {
    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        store = ?config.store.backend,
        "keyed-gateway starting"
    );

    if config.observability.metrics_enabled {
        let address = &config.observability.metrics_address;
        let addr = address
            .parse::<SocketAddr>()
            .map_err(|_| StartupError::MetricsAddress(address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let store = open_store(&config.store).await?;
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, store)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
