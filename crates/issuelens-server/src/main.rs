// SPDX-License-Identifier: Apache-2.0

//! Binary entry point for the IssueLens HTTP server.

use clap::Parser;
use issuelens_core::{EnvCredentials, load_config};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Serve IssueLens issue analysis over HTTP.
#[derive(Parser)]
#[command(name = "issuelens-server", version, about)]
struct Args {
    /// Interface to bind (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("issuelens=info,tower_http=info,reqwest=error"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut config = load_config()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    issuelens_server::run_http(&config, &EnvCredentials).await
}
