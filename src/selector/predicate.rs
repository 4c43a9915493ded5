//! Predicate (callback) selector.

use std::fmt;

use bytes::Bytes;
use http::{Request, Response};

use crate::error::DispatchError;
use crate::http::response::CannedResponse;
use crate::selector::Resolve;

type PredicateFn = dyn Fn(&Request<Bytes>) -> bool + Send + Sync;

/// A predicate paired with the response it selects.
pub struct CallbackResponse {
    predicate: Box<PredicateFn>,
    response: CannedResponse,
}

impl CallbackResponse {
    pub fn new<F>(predicate: F, response: CannedResponse) -> Self
    where
        F: Fn(&Request<Bytes>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            response,
        }
    }

    pub fn matches(&self, req: &Request<Bytes>) -> bool {
        (self.predicate)(req)
    }

    pub fn response(&self) -> &CannedResponse {
        &self.response
    }
}

impl fmt::Debug for CallbackResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackResponse")
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

/// Evaluates predicates in registration order; the first true one wins.
///
/// Predicates are expected to be deterministic and side-effect free for a
/// given request, otherwise "first match" loses its meaning.
#[derive(Debug, Default)]
pub struct Predicate {
    rules: Vec<CallbackResponse>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when<F>(mut self, predicate: F, response: CannedResponse) -> Self
    where
        F: Fn(&Request<Bytes>) -> bool + Send + Sync + 'static,
    {
        self.rules.push(CallbackResponse::new(predicate, response));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Resolve for Predicate {
    fn resolve(&mut self, req: &Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        self.rules
            .iter()
            .find(|rule| rule.matches(req))
            .map(|rule| rule.response.to_response())
            .ok_or_else(|| DispatchError::ResponseNotFound {
                method: req.method().to_string(),
                path: req.uri().path().to_string(),
            })
    }
}
