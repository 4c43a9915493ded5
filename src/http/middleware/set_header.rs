//! Request header injection.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Request, Response};

use crate::error::DispatchError;
use crate::http::middleware::{Middleware, Next};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertMode {
    Override,
    IfNotPresent,
}

/// Sets a header on every outgoing request.
#[derive(Debug, Clone)]
pub struct SetRequestHeader {
    name: HeaderName,
    value: HeaderValue,
    mode: InsertMode,
}

impl SetRequestHeader {
    /// Replace any existing value.
    pub fn overriding(name: HeaderName, value: HeaderValue) -> Self {
        Self {
            name,
            value,
            mode: InsertMode::Override,
        }
    }

    /// Only set the header when the request does not carry it yet.
    pub fn if_not_present(name: HeaderName, value: HeaderValue) -> Self {
        Self {
            name,
            value,
            mode: InsertMode::IfNotPresent,
        }
    }
}

impl Middleware for SetRequestHeader {
    fn handle(&self, mut request: Request<Bytes>, next: Next<'_>) -> Result<Response<Bytes>, DispatchError> {
        let headers = request.headers_mut();
        match self.mode {
            InsertMode::Override => {
                headers.insert(self.name.clone(), self.value.clone());
            }
            InsertMode::IfNotPresent => {
                if !headers.contains_key(&self.name) {
                    headers.insert(self.name.clone(), self.value.clone());
                }
            }
        }
        next.run(request)
    }
}
