// SPDX-License-Identifier: Apache-2.0

//! Serve command - runs the HTTP analysis service in the foreground.

use anyhow::Result;
use issuelens_core::{AppConfig, EnvCredentials};

/// Starts the HTTP service, applying `--host`/`--port` overrides.
pub async fn run(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    eprintln!(
        "Serving IssueLens on http://{}:{} (Ctrl+C to stop)",
        config.server.host, config.server.port
    );
    issuelens_server::run_http(&config, &EnvCredentials).await
}
