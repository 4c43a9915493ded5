//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every dispatch produces:
//!     → logging.rs (structured request / response / error events)
//!     → metrics.rs (request counters, failure counters, latency)
//!
//! Consumers:
//!     → Whatever subscriber / recorder the test binary installs
//!     → Nothing at all when none is installed
//! ```
//!
//! # Design Decisions
//! - Events are emitted through `tracing` and `metrics` facades only
//! - No subscriber or recorder installed = no-op, outcome unchanged
//! - Request ID flows through every event of a dispatch

pub mod logging;
pub mod metrics;
