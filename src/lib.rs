//! # JoinIn
//!
//! Library facade for the JoinIn session coordination engine. Re-exports
//! the member crates and owns process-level logging setup.
//!
//! The engine lets users broadcast short-lived, location-bound meetup
//! sessions that others can discover and join in real time, with a
//! capacity limit, an expiry, and a live group chat.

use tracing_subscriber::{EnvFilter, fmt};

pub use joinin_core as core;
pub use joinin_engine as engine;
pub use joinin_entity as entity;
pub use joinin_store as store;

pub use joinin_core::config::AppConfig;
pub use joinin_core::error::AppError;
pub use joinin_engine::JoinInEngine;
pub use joinin_store::SessionStore;

/// Initialize tracing/logging from configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging(config: &joinin_core::config::logging::LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}
