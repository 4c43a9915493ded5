//! Closure-backed steps.

use std::fmt;

use bytes::Bytes;
use http::{Request, Response};

use crate::error::DispatchError;
use crate::http::middleware::{Middleware, Next};

/// A step written as a closure taking the request and `next`.
pub struct FromFn<F> {
    func: F,
}

pub fn from_fn<F>(func: F) -> FromFn<F>
where
    F: Fn(Request<Bytes>, Next<'_>) -> Result<Response<Bytes>, DispatchError> + Send + Sync,
{
    FromFn { func }
}

impl<F> Middleware for FromFn<F>
where
    F: Fn(Request<Bytes>, Next<'_>) -> Result<Response<Bytes>, DispatchError> + Send + Sync,
{
    fn handle(&self, request: Request<Bytes>, next: Next<'_>) -> Result<Response<Bytes>, DispatchError> {
        (self.func)(request, next)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// Rewrites the request before it continues down the chain.
pub struct MapRequest<F> {
    func: F,
}

pub fn map_request<F>(func: F) -> MapRequest<F>
where
    F: Fn(Request<Bytes>) -> Request<Bytes> + Send + Sync,
{
    MapRequest { func }
}

impl<F> Middleware for MapRequest<F>
where
    F: Fn(Request<Bytes>) -> Request<Bytes> + Send + Sync,
{
    fn handle(&self, request: Request<Bytes>, next: Next<'_>) -> Result<Response<Bytes>, DispatchError> {
        next.run((self.func)(request))
    }
}

/// Rewrites successful responses on their way back.
pub struct MapResponse<F> {
    func: F,
}

pub fn map_response<F>(func: F) -> MapResponse<F>
where
    F: Fn(Response<Bytes>) -> Response<Bytes> + Send + Sync,
{
    MapResponse { func }
}

impl<F> Middleware for MapResponse<F>
where
    F: Fn(Response<Bytes>) -> Response<Bytes> + Send + Sync,
{
    fn handle(&self, request: Request<Bytes>, next: Next<'_>) -> Result<Response<Bytes>, DispatchError> {
        next.run(request).map(&self.func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::handler::MockHandler;
    use crate::http::response::CannedResponse;
    use crate::routing::route::Route;
    use crate::routing::router::RouteTable;
    use http::header::{HeaderValue, CONTENT_TYPE};
    use http::StatusCode;

    fn handler() -> MockHandler {
        MockHandler::new(RouteTable::from_routes(vec![
            Route::new("GET", "/v2/users", CannedResponse::ok("v2 users")).unwrap(),
        ]))
    }

    fn get(uri: &str) -> Request<Bytes> {
        Request::builder().uri(uri).body(Bytes::new()).unwrap()
    }

    #[test]
    fn test_map_request_rewrites_path() {
        let stack: Vec<Box<dyn Middleware>> = vec![Box::new(map_request(|mut req: Request<Bytes>| {
            let rewritten = format!("/v2{}", req.uri().path());
            if let Ok(uri) = rewritten.parse() {
                *req.uri_mut() = uri;
            }
            req
        }))];
        let mut handler = handler();

        let response = Next::new(&stack, &mut handler).run(get("/users")).unwrap();
        assert_eq!(response.body(), &Bytes::from_static(b"v2 users"));
    }

    #[test]
    fn test_map_response_adds_header() {
        let stack: Vec<Box<dyn Middleware>> = vec![Box::new(map_response(|mut res: Response<Bytes>| {
            res.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
            res
        }))];
        let mut handler = handler();

        let response = Next::new(&stack, &mut handler).run(get("/v2/users")).unwrap();
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn test_from_fn_can_short_circuit() {
        let stack: Vec<Box<dyn Middleware>> = vec![Box::new(from_fn(
            |req: Request<Bytes>, next: Next<'_>| {
                if req.uri().path() == "/blocked" {
                    return Ok(CannedResponse::new(StatusCode::FORBIDDEN).to_response());
                }
                next.run(req)
            },
        ))];
        let mut handler = handler();

        let blocked = Next::new(&stack, &mut handler).run(get("/blocked")).unwrap();
        assert_eq!(blocked.status(), StatusCode::FORBIDDEN);

        let passed = Next::new(&stack, &mut handler).run(get("/v2/users")).unwrap();
        assert_eq!(passed.status(), StatusCode::OK);
    }
}
