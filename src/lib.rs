//! In-process HTTP mock dispatcher.
//!
//! Tests register routes (method + path pattern + response selector) on a
//! `MockClient`; requests sent through it are answered from those routes
//! without touching the network.
//!
//! # Architecture Overview
//!
//! ```text
//!     MockClient::send(request)
//!         │
//!         ▼
//!     http::middleware  (request id → user steps → http errors)
//!         │
//!         ▼
//!     client::handler   (normalise target, log, metrics)
//!         │
//!         ▼
//!     routing           (first route whose method and path match)
//!         │
//!         ▼
//!     selector          (fixed / conditional / sequential / predicate / handler)
//!         │
//!         ▼
//!     http::Response<Bytes>  or  DispatchError
//! ```
//!
//! ```
//! use http::StatusCode;
//! use http_route_mock::{CannedResponse, MockClient, Route};
//!
//! let mut client = MockClient::builder()
//!     .route(Route::get("/country/IT").response(CannedResponse::ok("Italy")).build()?)
//!     .build();
//!
//! let response = client.get("http://api.example.com/country/IT")?;
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(response.body().as_ref(), b"Italy");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;
pub mod selector;

pub use crate::client::{MockClient, MockClientBuilder};
pub use crate::config::schema::MockConfig;
pub use crate::error::{BoxError, DispatchError, ResponseError, RouteError, RouteField};
pub use crate::http::middleware::Middleware;
pub use crate::http::response::CannedResponse;
pub use crate::routing::{QueryParams, Route, RouteBuilder, RouteTable};
pub use crate::selector::{Conditional, Predicate, Selector, Sequential};
