//! Response selection subsystem.
//!
//! # Data Flow
//! ```text
//! Route matched (method + path)
//!     → Selector::resolve(request)
//!         - fixed.rs (always the same canned response)
//!         - conditional.rs (first matching query-parameter rule, else default)
//!         - sequential.rs (next response in order, fails once exhausted)
//!         - predicate.rs (first predicate returning true, else ResponseNotFound)
//!         - Handler (user closure computing the response)
//!     → http::Response or DispatchError
//! ```
//!
//! # Design Decisions
//! - Closed set of variants behind one `Resolve` capability
//! - Selectors own their responses; nothing is shared between routes
//! - Sequential state is a plain cursor: one owner per test case, no locks

pub mod conditional;
pub mod fixed;
pub mod predicate;
pub mod sequential;

use std::fmt;

use bytes::Bytes;
use http::{Request, Response};

use crate::error::{BoxError, DispatchError};
use crate::http::response::CannedResponse;

pub use conditional::{Conditional, ConditionalResponse};
pub use fixed::Fixed;
pub use predicate::{CallbackResponse, Predicate};
pub use sequential::Sequential;

/// Turns a matched request into a response.
pub trait Resolve {
    fn resolve(&mut self, req: &Request<Bytes>) -> Result<Response<Bytes>, DispatchError>;
}

type HandlerFn = dyn FnMut(&Request<Bytes>) -> Result<Response<Bytes>, BoxError> + Send;

/// A user closure computing the response from the request.
pub struct Handler {
    func: Box<HandlerFn>,
}

impl Handler {
    pub fn new<F>(func: F) -> Self
    where
        F: FnMut(&Request<Bytes>) -> Result<Response<Bytes>, BoxError> + Send + 'static,
    {
        Self {
            func: Box::new(func),
        }
    }
}

impl Resolve for Handler {
    fn resolve(&mut self, req: &Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        (self.func)(req).map_err(DispatchError::Handler)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

/// The strategy a route uses to produce its response.
#[derive(Debug)]
pub enum Selector {
    Fixed(Fixed),
    Conditional(Conditional),
    Sequential(Sequential),
    Predicate(Predicate),
    Handler(Handler),
}

impl Selector {
    /// Wraps a closure as a handler selector.
    pub fn handler<F>(func: F) -> Self
    where
        F: FnMut(&Request<Bytes>) -> Result<Response<Bytes>, BoxError> + Send + 'static,
    {
        Selector::Handler(Handler::new(func))
    }

    /// Variant name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Selector::Fixed(_) => "fixed",
            Selector::Conditional(_) => "conditional",
            Selector::Sequential(_) => "sequential",
            Selector::Predicate(_) => "predicate",
            Selector::Handler(_) => "handler",
        }
    }
}

impl Resolve for Selector {
    fn resolve(&mut self, req: &Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        match self {
            Selector::Fixed(fixed) => fixed.resolve(req),
            Selector::Conditional(conditional) => conditional.resolve(req),
            Selector::Sequential(sequential) => sequential.resolve(req),
            Selector::Predicate(predicate) => predicate.resolve(req),
            Selector::Handler(handler) => handler.resolve(req),
        }
    }
}

impl From<CannedResponse> for Selector {
    fn from(response: CannedResponse) -> Self {
        Selector::Fixed(Fixed::new(response))
    }
}

impl From<Fixed> for Selector {
    fn from(fixed: Fixed) -> Self {
        Selector::Fixed(fixed)
    }
}

impl From<Conditional> for Selector {
    fn from(conditional: Conditional) -> Self {
        Selector::Conditional(conditional)
    }
}

impl From<Sequential> for Selector {
    fn from(sequential: Sequential) -> Self {
        Selector::Sequential(sequential)
    }
}

impl From<Predicate> for Selector {
    fn from(predicate: Predicate) -> Self {
        Selector::Predicate(predicate)
    }
}

impl From<Handler> for Selector {
    fn from(handler: Handler) -> Self {
        Selector::Handler(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_handler_echoes_request() {
        let mut selector = Selector::handler(|req: &Request<Bytes>| {
            let value = req
                .headers()
                .get("test-header")
                .map(|v| v.as_bytes().to_vec())
                .unwrap_or_default();
            Ok(Response::new(Bytes::from(value)))
        });

        let req = Request::builder()
            .uri("/headers")
            .header("test-header", "test-value")
            .body(Bytes::new())
            .unwrap();
        let response = selector.resolve(&req).unwrap();
        assert_eq!(response.body(), &Bytes::from_static(b"test-value"));
        assert_eq!(selector.kind(), "handler");
    }

    #[test]
    fn test_handler_error_passes_through() {
        let mut selector = Selector::handler(|_req: &Request<Bytes>| Err("upstream blew up".into()));

        let req = Request::builder().uri("/").body(Bytes::new()).unwrap();
        let err = selector.resolve(&req).unwrap_err();
        assert!(matches!(err, DispatchError::Handler(_)));
        assert_eq!(err.to_string(), "upstream blew up");
    }

    #[test]
    fn test_canned_response_becomes_fixed() {
        let mut selector = Selector::from(CannedResponse::new(StatusCode::CREATED));
        assert_eq!(selector.kind(), "fixed");

        let req = Request::builder().uri("/").body(Bytes::new()).unwrap();
        assert_eq!(selector.resolve(&req).unwrap().status(), StatusCode::CREATED);
    }
}
