//! Method-filtering JSON-RPC reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 RPC SENTRY                    │
//!                    │                                               │
//!   JSON-RPC POST    │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//!   ─────────────────┼─▶│   http   │──▶│    rpc    │──▶│ forward │──┼──▶ Backend
//!                    │  │  server  │   │ validator │   │  relay  │  │    RPC server
//!                    │  └──────────┘   └─────┬─────┘   └────┬────┘  │
//!                    │                       │              │       │
//!   error envelope   │                 ┌─────▼─────┐        │       │
//!   ◀────────────────┼─────────────────│ allowlist │        │       │
//!                    │                 └───────────┘        │       │
//!   relayed body     │                                      │       │
//!   ◀────────────────┼──────────────────────────────────────┘       │
//!                    │                                               │
//!                    │  config · observability (logging, audit)      │
//!                    │  lifecycle (graceful shutdown)                │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use url::Url;

use rpc_sentry::allowlist::AllowList;
use rpc_sentry::config::{load_config, validate_config, BackendConfig, ProxyConfig};
use rpc_sentry::http::HttpServer;
use rpc_sentry::lifecycle::Shutdown;
use rpc_sentry::observability::logging;

#[derive(Debug, Parser)]
#[command(name = "rpc-sentry")]
#[command(about = "Allow-list filtering reverse proxy for JSON-RPC 2.0", long_about = None)]
struct Cli {
    /// Optional TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Allow-list file path, one method name per line
    #[arg(long)]
    whitelist: Option<PathBuf>,

    /// Binding address
    #[arg(long)]
    bind: Option<String>,

    /// Binding port
    #[arg(long)]
    port: Option<u16>,

    /// Localhost port to forward permitted requests to
    #[arg(long)]
    forward: Option<u16>,

    /// Full backend URL (overrides --forward)
    #[arg(long)]
    backend_url: Option<Url>,

    /// Backend call timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log file path (appended to, in addition to stderr)
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective configuration from the optional config file
    /// plus flag overrides.
    fn into_config(self) -> Result<ProxyConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProxyConfig::default(),
        };

        if self.bind.is_some() || self.port.is_some() {
            let host = self.bind.unwrap_or_else(|| "0.0.0.0".to_string());
            let port = self.port.unwrap_or(8080);
            config.listener.bind_address = format!("{host}:{port}");
        }
        if let Some(url) = self.backend_url {
            config.backend.url = url;
        } else if let Some(port) = self.forward {
            config.backend = BackendConfig {
                timeout_secs: config.backend.timeout_secs,
                ..BackendConfig::for_local_port(port)
            };
        }
        if let Some(secs) = self.timeout_secs {
            config.backend.timeout_secs = secs;
        }
        if let Some(path) = self.whitelist {
            config.allowlist.path = path;
        }
        if let Some(path) = self.log {
            config.log.file = Some(path);
        }

        if let Err(errors) = validate_config(&config) {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(format!("invalid configuration: {joined}").into());
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(config.log.file.as_deref())?;

    tracing::info!("rpc-sentry v0.1.0 starting");

    // A missing or empty allow-list must abort startup, never run open.
    let allowlist = AllowList::from_file(&config.allowlist.path)?;
    tracing::info!(
        methods = allowlist.len(),
        path = %config.allowlist.path.display(),
        "Allow-list loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        backend = %config.backend.url,
        backend_timeout_secs = config.backend.timeout_secs,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, allowlist);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
