//! Consecutive-calls selector.
//!
//! Returns one response per call, in registration order. The call after
//! the last response fails with `TooManyConsecutiveCalls`; the cursor never
//! wraps around.
//!
//! The cursor is plain owned state mutated on every dispatch. A route using
//! this selector must not be shared between concurrently dispatching callers
//! without external locking; the intended usage is one client per test case.

use bytes::Bytes;
use http::{Request, Response};

use crate::error::DispatchError;
use crate::http::response::CannedResponse;
use crate::selector::Resolve;

#[derive(Debug, Clone, Default)]
pub struct Sequential {
    responses: Vec<CannedResponse>,
    cursor: usize,
}

impl Sequential {
    pub fn new(responses: Vec<CannedResponse>) -> Self {
        Self {
            responses,
            cursor: 0,
        }
    }

    /// Appends a response to the end of the sequence.
    pub fn then(mut self, response: CannedResponse) -> Self {
        self.responses.push(response);
        self
    }

    /// Number of successful calls so far.
    pub fn calls(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.responses.len() - self.cursor
    }

    pub fn responses(&self) -> &[CannedResponse] {
        &self.responses
    }
}

impl Resolve for Sequential {
    fn resolve(&mut self, req: &Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        let Some(canned) = self.responses.get(self.cursor) else {
            return Err(DispatchError::TooManyConsecutiveCalls {
                path: req.uri().path().to_string(),
                responses: self.responses.clone(),
            });
        };
        let response = canned.to_response();
        self.cursor += 1;
        Ok(response)
    }
}
