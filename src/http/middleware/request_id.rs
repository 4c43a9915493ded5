//! Request ID generation.
//!
//! # Responsibilities
//! - Attach an `x-request-id` to requests that do not carry one
//! - Mirror it into request extensions for handlers and logs
//!
//! # Design Decisions
//! - A caller-supplied ID is kept as is
//! - UUID v4, generated only when missing

use bytes::Bytes;
use http::header::HeaderValue;
use http::{Request, Response};
use uuid::Uuid;

use crate::error::DispatchError;
use crate::http::middleware::{Middleware, Next};
use crate::http::request::{RequestId, X_REQUEST_ID};

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdStep;

impl Middleware for RequestIdStep {
    fn handle(&self, mut request: Request<Bytes>, next: Next<'_>) -> Result<Response<Bytes>, DispatchError> {
        let existing = request
            .headers()
            .get(&X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let id = match existing {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                if let Ok(value) = HeaderValue::from_str(&id) {
                    request.headers_mut().insert(X_REQUEST_ID.clone(), value);
                }
                id
            }
        };

        request.extensions_mut().insert(RequestId(id));
        next.run(request)
    }
}
