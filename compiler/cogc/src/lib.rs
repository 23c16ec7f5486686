//! Cog command-line driver.
//!
//! ```text
//! source ──► lex ──► parse ──► compile ──► Runtime (tick by tick)
//! ```
//!
//! The binary is a thin argument parser over [`commands`]; everything it
//! does is reachable from the library so tests can drive it in-process.

use std::sync::Once;

pub mod commands;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`. Does nothing
/// when `RUST_LOG` is unset, so normal runs pay no logging cost.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .with_thread_names(true),
                )
                .with(filter)
                .init();
        }
    });
}
