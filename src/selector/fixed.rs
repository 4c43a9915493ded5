//! Fixed response selector.

use bytes::Bytes;
use http::{Request, Response};

use crate::error::DispatchError;
use crate::http::response::CannedResponse;
use crate::selector::Resolve;

/// Always returns the same response, whatever the request.
#[derive(Debug, Clone)]
pub struct Fixed {
    response: CannedResponse,
}

impl Fixed {
    pub fn new(response: CannedResponse) -> Self {
        Self { response }
    }

    pub fn response(&self) -> &CannedResponse {
        &self.response
    }
}

impl Resolve for Fixed {
    fn resolve(&mut self, _req: &Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        Ok(self.response.to_response())
    }
}
