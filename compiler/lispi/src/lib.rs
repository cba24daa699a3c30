//! Lisp interpreter driver.
//!
//! Reads source files, feeds them form by form through the reader and the
//! evaluator, and reports what reaches top level. The `lisp` binary is a thin
//! argument parser over [`commands`].

pub mod commands;
pub mod driver;

pub use driver::{read_source, run_source, DriverError, RunOutcome};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber, once per process.
///
/// Does nothing unless `RUST_LOG` is set, so normal runs pay no logging cost.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
