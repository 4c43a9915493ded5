//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries and test suites
//! - Configure level and format from `LoggingConfig`
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - JSON format for machine parsing, pretty format for local runs
//! - Initialization is fallible, never panics on a second call

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::{LogFormat, LoggingConfig};

/// Install a global subscriber built from the config.
pub fn try_init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
}

/// Subscriber writing through the test harness so output is captured per test.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "http_route_mock=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
