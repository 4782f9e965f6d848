//! Method rewrite gateway.
//!
//! Serves HTTP and rewrites request methods according to `Method`
//! directives declared per server, virtual host and location.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────┐
//!                     │                  METHOD REWRITE                   │
//!                     │                                                   │
//!   Client Request    │  ┌─────────┐   ┌────────────┐   ┌──────────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│  routing   │──▶│   rewrite    │  │
//!                     │  │ server  │   │ resolve    │   │   fixup      │  │
//!                     │  └─────────┘   │ scope      │   └──────┬───────┘  │
//!                     │                └─────▲──────┘          │          │
//!                     │                      │                 ▼          │
//!   Echo Response     │                ┌─────┴──────┐   ┌──────────────┐  │
//!   ◀─────────────────┼────────────────│ scope tree │   │ echo handler │  │
//!                     │                │ (arc-swap) │   └──────────────┘  │
//!                     │                └─────▲──────┘                     │
//!                     │                      │                            │
//!                     │  ┌─────────┐   ┌─────┴──────┐   ┌──────────────┐  │
//!                     │  │ config  │──▶│ directive  │──▶│ scope merge  │  │
//!                     │  │ watcher │   │ parser     │   │              │  │
//!                     │  └─────────┘   └────────────┘   └──────────────┘  │
//!                     └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use method_rewrite::config::{load_config, watcher::ConfigWatcher, GatewayConfig};
use method_rewrite::lifecycle::{signals, Shutdown};
use method_rewrite::observability::{logging, metrics};
use method_rewrite::HttpServer;

#[derive(Parser)]
#[command(name = "method-rewrite")]
#[command(about = "HTTP gateway that rewrites request methods per scope", long_about = None)]
struct Cli {
    /// Site configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload scopes when the configuration file changes.
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("method-rewrite v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        virtual_hosts = config.virtual_hosts.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    // Build scopes before binding: a bad directive aborts startup.
    let server = HttpServer::new(config.clone())?;

    let (config_updates, _watcher) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            (rx, Some(watcher.run()?))
        }
        _ => (tokio::sync::mpsc::unbounded_channel().1, None),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            signals::stop_requested().await;
            shutdown.trigger();
        }
    });

    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
