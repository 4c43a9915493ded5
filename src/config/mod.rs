//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, every error collected)
//!     → MockConfig (validated)
//!     → build_routes / build_client
//!     → MockClient ready for dispatch
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Files referenced by responses are read once, when routes are built

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_client, load_config, parse_config, ConfigError};
pub use schema::{ClientConfig, LogFormat, LoggingConfig, MockConfig, ResponseConfig, RouteConfig};
pub use validation::{validate_config, ValidationError};
