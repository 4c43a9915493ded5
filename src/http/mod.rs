//! HTTP message handling.
//!
//! # Data Flow
//! ```text
//! caller target / http::Request
//!     → request.rs (parse target, strip scheme/host/user-info)
//!     → [routing picks a route and a selector]
//!     → response.rs (canned response → fresh http::Response)
//!     → caller
//!
//! Client middleware (middleware/) wraps the whole path above.
//! ```

pub mod middleware;
pub mod request;
pub mod response;

pub use request::{normalize, parse_target, RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::CannedResponse;
