//! Employee Facade (v1)
//!
//! A REST facade over the upstream employee service, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────────────┐
//!                        │                   EMPLOYEE FACADE                     │
//!                        │                                                       │
//!     Client Request     │  ┌──────────┐    ┌────────────┐    ┌──────────────┐   │
//!     ───────────────────┼─▶│  http    │───▶│  employee  │───▶│   upstream   │───┼───▶ Upstream
//!                        │  │  router  │    │  service   │    │    client    │   │     Employee
//!     Client Response    │  │          │◀───│ (aggregate)│◀───│ (retry on    │◀──┼──── Service
//!     ◀──────────────────┼──│ response │    │            │    │  429)        │   │
//!                        │  └──────────┘    └────────────┘    └──────────────┘   │
//!                        │                                                       │
//!                        │  ┌─────────────────────────────────────────────────┐  │
//!                        │  │             Cross-Cutting Concerns              │  │
//!                        │  │  config │ observability │ resilience │ lifecycle │  │
//!                        │  └─────────────────────────────────────────────────┘  │
//!                        └───────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use employee_facade::config::resolve_config;
use employee_facade::observability::{logging, metrics};
use employee_facade::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "employee-facade")]
#[command(about = "REST facade for the upstream employee service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("employee-facade v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        max_attempts = config.retries.max_attempts,
        retry_delay_ms = config.retries.delay_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
