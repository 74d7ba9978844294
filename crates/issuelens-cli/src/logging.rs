// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the IssueLens CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging on
//! stderr, so stdout stays clean for JSON/YAML output.
//!
//! # Examples
//!
//! ```bash
//! # Pipeline stages and HTTP calls
//! RUST_LOG=issuelens=debug issuelens analyze https://github.com/owner/repo 42
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "issuelens=warn,reqwest=error";

/// Filter used with `--verbose` when `RUST_LOG` is not set.
const VERBOSE_FILTER: &str = "issuelens=debug,reqwest=warn";

/// Initialize the logging subsystem.
///
/// `RUST_LOG` always wins; otherwise `verbose` selects between the quiet
/// default and debug output for IssueLens crates.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
