//! Page router HTTP host.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 PAGE ROUTER                   │
//!                    │                                               │
//!   Navigation       │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│ routing  │───▶│  page   │  │
//!                    │  │ server  │    │ registry │    │ targets │  │
//!                    │  └─────────┘    └────┬─────┘    └─────────┘  │
//!                    │                      │                       │
//!                    │                      ▼                       │
//!                    │                ┌──────────┐                  │
//!                    │                │  guards  │ (redirects)      │
//!                    │                └──────────┘                  │
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns          │ │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                    │  │  │ config │ │observability│ │lifecycle│ │ │
//!                    │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! The route table is loaded and validated once at startup; the frozen
//! registry then serves every navigation until shutdown.

use std::path::Path;

use tokio::net::TcpListener;

use page_router::config::loader::load_config;
use page_router::config::RouterConfig;
use page_router::lifecycle::{signals, Shutdown};
use page_router::observability::{logging, metrics};
use page_router::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/routes.toml".to_string());

    let (config, from_file) = if Path::new(&config_path).exists() {
        (load_config(Path::new(&config_path))?, true)
    } else {
        (RouterConfig::default(), false)
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("page-router v0.1.0 starting");
    if from_file {
        tracing::info!(path = %config_path, "Route table loaded");
    } else {
        tracing::warn!(path = %config_path, "Route table not found, starting with empty registry");
    }
    tracing::info!(
        bind_address = %config.listener.bind_address,
        pages = config.pages.len(),
        max_redirect_hops = config.limits.max_redirect_hops,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    // Metrics exporter
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Graceful shutdown on SIGINT/SIGTERM
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::listen_for_signals(shutdown));

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
