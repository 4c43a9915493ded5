//! Mocked HTTP client.
//!
//! # Data Flow
//! ```text
//! test code
//!     → MockClient::send / request / get   (or tower::Service::call)
//!     → middleware steps (request id, user steps, http errors)
//!     → handler.rs (normalise, log, dispatch through the route table)
//!     → Response<Bytes> or DispatchError
//! ```
//!
//! # Design Decisions
//! - Dispatch takes `&mut self`: one client per test case, no locks
//! - Routes may be added after the client is built
//! - Stands in for a real transport through `tower::Service`

pub mod handler;

use std::fmt;
use std::future::{ready, Ready};
use std::task::{Context, Poll};

use bytes::Bytes;
use http::{Method, Request, Response};
use tower::Service;

use crate::error::DispatchError;
use crate::http::middleware::{HttpErrors, Middleware, Next, RequestIdStep};
use crate::http::request::parse_target;
use crate::routing::route::Route;
use crate::routing::router::RouteTable;

pub use handler::MockHandler;

/// An HTTP client whose transport is a route table.
pub struct MockClient {
    handler: MockHandler,
    middleware: Vec<Box<dyn Middleware>>,
}

impl MockClient {
    pub fn builder() -> MockClientBuilder {
        MockClientBuilder::default()
    }

    /// A client with default middleware over the given routes.
    pub fn new(routes: Vec<Route>) -> Self {
        Self::builder().routes(routes).build()
    }

    /// Registers another route. It has lower priority than existing ones.
    pub fn add_route(&mut self, route: Route) -> &mut Self {
        self.handler.add_route(route);
        self
    }

    pub fn routes(&self) -> &[Route] {
        self.handler.table().routes()
    }

    /// Sends a request through the middleware chain to the route table.
    pub fn send(&mut self, request: Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        Next::new(&self.middleware, &mut self.handler).run(request)
    }

    /// Sends a bodiless request to `target` (absolute URL, `/path` or `path`).
    pub fn request(&mut self, method: Method, target: &str) -> Result<Response<Bytes>, DispatchError> {
        let uri = parse_target(target)?;
        let mut request = Request::new(Bytes::new());
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        self.send(request)
    }

    pub fn get(&mut self, target: &str) -> Result<Response<Bytes>, DispatchError> {
        self.request(Method::GET, target)
    }
}

impl fmt::Debug for MockClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockClient")
            .field("handler", &self.handler)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

impl Service<Request<Bytes>> for MockClient {
    type Response = Response<Bytes>;
    type Error = DispatchError;
    type Future = Ready<Result<Response<Bytes>, DispatchError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        ready(self.send(request))
    }
}

/// Collects routes and middleware for a `MockClient`.
///
/// Step order: request ID (when enabled), user steps in registration
/// order, then `HttpErrors` (when enabled) closest to the dispatcher.
pub struct MockClientBuilder {
    routes: Vec<Route>,
    middleware: Vec<Box<dyn Middleware>>,
    http_errors: bool,
    request_id: bool,
}

impl Default for MockClientBuilder {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            middleware: Vec::new(),
            http_errors: true,
            request_id: false,
        }
    }
}

impl MockClientBuilder {
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes);
        self
    }

    pub fn middleware(mut self, step: impl Middleware + 'static) -> Self {
        self.middleware.push(Box::new(step));
        self
    }

    /// Turn 4xx/5xx responses into `ClientError`/`ServerError`. On by default.
    pub fn http_errors(mut self, enabled: bool) -> Self {
        self.http_errors = enabled;
        self
    }

    /// Attach an `x-request-id` to every request. Off by default.
    pub fn request_id(mut self, enabled: bool) -> Self {
        self.request_id = enabled;
        self
    }

    pub fn build(self) -> MockClient {
        let mut stack: Vec<Box<dyn Middleware>> = Vec::with_capacity(self.middleware.len() + 2);
        if self.request_id {
            stack.push(Box::new(RequestIdStep));
        }
        stack.extend(self.middleware);
        if self.http_errors {
            stack.push(Box::new(HttpErrors));
        }

        let mut handler = MockHandler::new(RouteTable::new());
        for route in self.routes {
            handler.add_route(route);
        }

        MockClient {
            handler,
            middleware: stack,
        }
    }
}
