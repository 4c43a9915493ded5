//! Client middleware.
//!
//! # Data Flow
//! ```text
//! MockClient::send(request)
//!     → step 0 (outermost) → step 1 → ... → step n
//!     → MockHandler::dispatch (log, route, resolve)
//!     ← response or error travels back out through the same steps
//! ```
//!
//! # Design Decisions
//! - An explicit ordered list, not nested closures: each step gets the
//!   request and a `Next` it may call at most once
//! - The first registered step is the outermost one
//! - A step may short-circuit by returning without calling `next`

pub mod http_errors;
pub mod map;
pub mod request_id;
pub mod set_header;

use bytes::Bytes;
use http::{Request, Response};

use crate::client::handler::MockHandler;
use crate::error::DispatchError;

pub use http_errors::HttpErrors;
pub use map::{from_fn, map_request, map_response, FromFn, MapRequest, MapResponse};
pub use request_id::RequestIdStep;
pub use set_header::SetRequestHeader;

/// One transformation step around the core dispatch.
pub trait Middleware: Send + Sync {
    fn handle(&self, request: Request<Bytes>, next: Next<'_>) -> Result<Response<Bytes>, DispatchError>;
}

/// The remainder of the chain, ending at the dispatch wrapper.
pub struct Next<'a> {
    stack: &'a [Box<dyn Middleware>],
    handler: &'a mut MockHandler,
}

impl<'a> Next<'a> {
    pub(crate) fn new(stack: &'a [Box<dyn Middleware>], handler: &'a mut MockHandler) -> Self {
        Self { stack, handler }
    }

    /// Pass the request to the next step, or to the dispatcher.
    pub fn run(self, request: Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        match self.stack.split_first() {
            Some((step, rest)) => step.handle(
                request,
                Next {
                    stack: rest,
                    handler: self.handler,
                },
            ),
            None => self.handler.dispatch(request),
        }
    }
}
