//! Error taxonomy.
//!
//! # Responsibilities
//! - Build-time errors (incomplete or invalid route declarations)
//! - Response construction errors (unreadable files, bad status codes)
//! - Dispatch-time errors (no route, no response, exhausted sequence)
//!
//! # Design Decisions
//! - Only the no-route case is enriched with diagnostic context
//! - Handler errors are carried through untouched, never rewrapped
//! - No retry or recovery anywhere: every error reaches the caller

use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use http::StatusCode;
use thiserror::Error;

use crate::http::response::CannedResponse;
use crate::routing::route::RouteSummary;

/// Error type user handlers and middleware may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A field a route needs before it can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteField {
    Method,
    Path,
    Handler,
}

impl RouteField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteField::Method => "method",
            RouteField::Path => "path",
            RouteField::Handler => "handler",
        }
    }
}

impl fmt::Display for RouteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// One or more required fields were never set.
    #[error("incomplete route: set {} before build", quoted_fields(.missing))]
    IncompleteRoute { missing: Vec<RouteField> },

    /// The method is not a valid HTTP token.
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),
}

impl RouteError {
    /// Fields reported missing, empty for other variants.
    pub fn missing(&self) -> &[RouteField] {
        match self {
            RouteError::IncompleteRoute { missing } => missing,
            RouteError::InvalidMethod(_) => &[],
        }
    }
}

fn quoted_fields(fields: &[RouteField]) -> String {
    let names: Vec<String> = fields
        .iter()
        .map(|field| format!("parameter \"{}\"", field))
        .collect();
    names.join(", ")
}

/// Errors raised while building a canned response.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("failed to read response body from {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid HTTP status code {0}")]
    InvalidStatus(u16),

    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },
}

/// Errors raised while dispatching a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered route matches the request's method and path.
    #[error("{}", route_not_found_message(.method, .path, .routes))]
    RouteNotFound {
        method: String,
        path: String,
        routes: Vec<RouteSummary>,
    },

    /// A predicate route had no predicate accepting the request.
    #[error("no mocked response matches {method} {path}")]
    ResponseNotFound { method: String, path: String },

    /// A sequential route was called more times than it has responses.
    #[error("Endpoint \"{path}\" has been called too many times")]
    TooManyConsecutiveCalls {
        path: String,
        responses: Vec<CannedResponse>,
    },

    /// A 4xx response surfaced by the `HttpErrors` step.
    #[error("client error {status}: {}", String::from_utf8_lossy(.body))]
    ClientError { status: StatusCode, body: Bytes },

    /// A 5xx response surfaced by the `HttpErrors` step.
    #[error("server error {status}: {}", String::from_utf8_lossy(.body))]
    ServerError { status: StatusCode, body: Bytes },

    /// The request target could not be turned into a URI.
    #[error("invalid request target {target:?}")]
    InvalidUri { target: String },

    /// Anything a user handler or middleware failed with.
    #[error(transparent)]
    Handler(BoxError),
}

impl DispatchError {
    /// Short stable name used as a log field and metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::RouteNotFound { .. } => "route_not_found",
            DispatchError::ResponseNotFound { .. } => "response_not_found",
            DispatchError::TooManyConsecutiveCalls { .. } => "too_many_consecutive_calls",
            DispatchError::ClientError { .. } => "client_error",
            DispatchError::ServerError { .. } => "server_error",
            DispatchError::InvalidUri { .. } => "invalid_uri",
            DispatchError::Handler(_) => "handler",
        }
    }

    /// Status of the response behind a `ClientError` or `ServerError`.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DispatchError::ClientError { status, .. } | DispatchError::ServerError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

fn route_not_found_message(method: &str, path: &str, routes: &[RouteSummary]) -> String {
    let mut message = format!("Mocked route {} {} not found", method, path);
    if !routes.is_empty() {
        message.push_str("\nMocked routes:\n\n");
        for route in routes {
            message.push_str(&format!("{}\n", route));
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_route_lists_every_field() {
        let err = RouteError::IncompleteRoute {
            missing: vec![RouteField::Method, RouteField::Handler],
        };
        assert_eq!(
            err.to_string(),
            "incomplete route: set parameter \"method\", parameter \"handler\" before build"
        );
        assert_eq!(err.missing(), &[RouteField::Method, RouteField::Handler]);
    }

    #[test]
    fn test_route_not_found_message() {
        let bare = DispatchError::RouteNotFound {
            method: "GET".into(),
            path: "/missing".into(),
            routes: vec![],
        };
        assert_eq!(bare.to_string(), "Mocked route GET /missing not found");

        let listed = DispatchError::RouteNotFound {
            method: "GET".into(),
            path: "/missing".into(),
            routes: vec![
                RouteSummary::new("GET", "/country/IT"),
                RouteSummary::new("POST", "/body"),
            ],
        };
        let message = listed.to_string();
        assert!(message.starts_with("Mocked route GET /missing not found\nMocked routes:\n\n"));
        assert!(message.contains("ROUTE GET /country/IT\n"));
        assert!(message.contains("ROUTE POST /body\n"));
    }

    #[test]
    fn test_handler_error_is_transparent() {
        let err = DispatchError::Handler("backend exploded".into());
        assert_eq!(err.to_string(), "backend exploded");
        assert_eq!(err.kind(), "handler");
    }

    #[test]
    fn test_too_many_calls_message() {
        let err = DispatchError::TooManyConsecutiveCalls {
            path: "/country".into(),
            responses: vec![],
        };
        assert_eq!(err.to_string(), "Endpoint \"/country\" has been called too many times");
    }
}
