//! realign - struct field alignment for Go
//!
//! Finds Go struct declarations whose fields could be ordered to take less
//! memory, or to leave the garbage collector fewer leading bytes to scan,
//! and optionally rewrites them in place with every comment kept beside
//! its field.
//!
//! ```text
//! package args ──► discover ──► filter ──► parse ──► check ──► report
//!                                                      │
//!                                                      ▼
//!                                        rewrite ──► print ──► apply
//! ```
//!
//! # Modules
//!
//! - [`config`] / [`cli`]: run options and flag parsing
//! - [`discover`] / [`filter`]: which files are analyzed
//! - [`markers`]: `realign:ignore` and `realign:check` directives
//! - [`check`]: per-declaration analysis
//! - [`rewrite`]: mapping the optimal order onto source slots
//! - [`apply`]: crash-safe file replacement
//! - [`driver`]: the whole run

pub mod apply;
pub mod check;
pub mod cli;
pub mod config;
pub mod discover;
pub mod driver;
pub mod error;
pub mod filter;
pub mod markers;
pub mod rewrite;
pub mod version;

use std::sync::Once;

pub use config::{Config, ConfigError, OutputFormat};
pub use driver::{analyze_paths, analyze_source, run, Analysis};
pub use error::ReadError;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=realignc=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
