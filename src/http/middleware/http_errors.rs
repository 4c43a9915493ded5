//! Turns error statuses into typed errors.
//!
//! Mirrors what a real client does with `http_errors` enabled: a 4xx
//! response becomes `ClientError`, a 5xx response becomes `ServerError`,
//! both carrying the status and the body.

use bytes::Bytes;
use http::{Request, Response};

use crate::error::DispatchError;
use crate::http::middleware::{Middleware, Next};

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpErrors;

impl Middleware for HttpErrors {
    fn handle(&self, request: Request<Bytes>, next: Next<'_>) -> Result<Response<Bytes>, DispatchError> {
        let response = next.run(request)?;
        let status = response.status();

        if status.is_client_error() {
            return Err(DispatchError::ClientError {
                status,
                body: response.into_body(),
            });
        }
        if status.is_server_error() {
            return Err(DispatchError::ServerError {
                status,
                body: response.into_body(),
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::handler::MockHandler;
    use crate::http::response::CannedResponse;
    use crate::routing::route::Route;
    use crate::routing::router::RouteTable;
    use http::StatusCode;

    fn handler() -> MockHandler {
        MockHandler::new(RouteTable::from_routes(vec![
            Route::new("GET", "/admin/dashboard", CannedResponse::new(StatusCode::UNAUTHORIZED)).unwrap(),
            Route::new(
                "GET",
                "/slow/api",
                CannedResponse::from_string("Gateway timeout", StatusCode::GATEWAY_TIMEOUT),
            )
            .unwrap(),
            Route::new("GET", "/moved", CannedResponse::new(StatusCode::MOVED_PERMANENTLY)).unwrap(),
        ]))
    }

    fn run(uri: &str) -> Result<Response<Bytes>, DispatchError> {
        let stack: Vec<Box<dyn Middleware>> = vec![Box::new(HttpErrors)];
        let mut handler = handler();
        let request = Request::builder().uri(uri).body(Bytes::new()).unwrap();
        Next::new(&stack, &mut handler).run(request)
    }

    #[test]
    fn test_client_error() {
        let err = run("/admin/dashboard").unwrap_err();
        assert!(matches!(err, DispatchError::ClientError { .. }));
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_server_error_keeps_body() {
        match run("/slow/api") {
            Err(DispatchError::ServerError { status, body }) => {
                assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
                assert_eq!(body, Bytes::from_static(b"Gateway timeout"));
            }
            other => panic!("expected ServerError, got {:?}", other),
        }
    }

    #[test]
    fn test_redirect_passes() {
        assert_eq!(run("/moved").unwrap().status(), StatusCode::MOVED_PERMANENTLY);
    }
}
