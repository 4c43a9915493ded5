//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Normalised request (method, /path?query, headers, body)
//!     → router.rs (ordered route scan)
//!     → matcher.rs (method + path pattern)
//!     → route.rs (winning route's selector)
//!     → Return: response, or RouteNotFound
//!
//! Route registration (test setup):
//!     RouteBuilder
//!     → validate method / path / selector in one pass
//!     → Route appended to RouteTable (insertion order = priority)
//! ```
//!
//! # Design Decisions
//! - Routes are fixed once built; only selector state changes at dispatch
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by insertion)

pub mod matcher;
pub mod query;
pub mod route;
pub mod router;

pub use matcher::{Matcher, MethodMatcher, PathMatcher, PathParams, PathPattern};
pub use query::{QueryParams, QueryValue};
pub use route::{Route, RouteBuilder, RouteSummary};
pub use router::RouteTable;
