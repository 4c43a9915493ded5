//! Route definitions and their validating builder.
//!
//! # Responsibilities
//! - Bind a method and a path pattern to a response selector
//! - Validate completeness in one pass at build time
//!
//! # Design Decisions
//! - Every missing field is reported at once, not just the first
//! - Empty method or path strings count as missing
//! - Method and path are fixed once built; only selector state moves

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};

use crate::error::{BoxError, DispatchError, ResponseError, RouteError, RouteField};
use crate::http::response::CannedResponse;
use crate::routing::matcher::{Matcher, MethodMatcher, PathMatcher, PathParams, PathPattern};
use crate::selector::{Resolve, Selector};

/// A registered (method, path, selector) binding.
#[derive(Debug)]
pub struct Route {
    method: MethodMatcher,
    path: PathMatcher,
    selector: Selector,
}

impl Route {
    /// Validating constructor.
    pub fn new(method: &str, path: &str, selector: impl Into<Selector>) -> Result<Self, RouteError> {
        RouteBuilder::new()
            .method(method)
            .path(path)
            .respond_with(selector)
            .build()
    }

    pub fn builder() -> RouteBuilder {
        RouteBuilder::new()
    }

    pub fn get(path: &str) -> RouteBuilder {
        RouteBuilder::new().method(Method::GET.as_str()).path(path)
    }

    pub fn post(path: &str) -> RouteBuilder {
        RouteBuilder::new().method(Method::POST.as_str()).path(path)
    }

    pub fn put(path: &str) -> RouteBuilder {
        RouteBuilder::new().method(Method::PUT.as_str()).path(path)
    }

    pub fn patch(path: &str) -> RouteBuilder {
        RouteBuilder::new().method(Method::PATCH.as_str()).path(path)
    }

    pub fn delete(path: &str) -> RouteBuilder {
        RouteBuilder::new().method(Method::DELETE.as_str()).path(path)
    }

    pub fn method(&self) -> &Method {
        self.method.method()
    }

    pub fn path(&self) -> &PathPattern {
        self.path.pattern()
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Matches method and path; returns the captured path parameters.
    pub fn captures(&self, req: &Request<Bytes>) -> Option<PathParams> {
        if !self.method.matches(req) {
            return None;
        }
        self.path.captures(req)
    }

    pub fn resolve(&mut self, req: &Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        self.selector.resolve(req)
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary::new(self.method().as_str(), self.path().as_str())
    }
}

/// `ROUTE <METHOD> <PATH>` line used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub method: String,
    pub path: String,
}

impl RouteSummary {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ROUTE {} {}", self.method, self.path)
    }
}

/// Accumulates route fields; `build` validates them together.
#[derive(Debug, Default)]
pub struct RouteBuilder {
    method: Option<String>,
    path: Option<String>,
    selector: Option<Selector>,
}

impl RouteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the selector, replacing any earlier one.
    pub fn respond_with(mut self, selector: impl Into<Selector>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn response(self, response: CannedResponse) -> Self {
        self.respond_with(response)
    }

    pub fn string_response(self, content: impl Into<String>, status: StatusCode) -> Self {
        self.respond_with(CannedResponse::from_string(content, status))
    }

    /// Reads the file now; the route serves its contents on every call.
    pub fn file_response(self, path: impl AsRef<Path>, status: StatusCode) -> Result<Self, ResponseError> {
        let response = CannedResponse::from_file(path, status)?;
        Ok(self.respond_with(response))
    }

    pub fn handler<F>(self, func: F) -> Self
    where
        F: FnMut(&Request<Bytes>) -> Result<Response<Bytes>, BoxError> + Send + 'static,
    {
        self.respond_with(Selector::handler(func))
    }

    pub fn build(self) -> Result<Route, RouteError> {
        let method = self.method.filter(|method| !method.is_empty());
        let path = self.path.filter(|path| !path.is_empty());

        match (method, path, self.selector) {
            (Some(method), Some(path), Some(selector)) => {
                let method = Method::from_bytes(method.as_bytes())
                    .map_err(|_| RouteError::InvalidMethod(method.clone()))?;
                Ok(Route {
                    method: MethodMatcher::new(method),
                    path: PathMatcher::new(&path),
                    selector,
                })
            }
            (method, path, selector) => {
                let missing = [
                    (method.is_none(), RouteField::Method),
                    (path.is_none(), RouteField::Path),
                    (selector.is_none(), RouteField::Handler),
                ]
                .into_iter()
                .filter_map(|(absent, field)| absent.then_some(field))
                .collect();
                Err(RouteError::IncompleteRoute { missing })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, uri: &str) -> Request<Bytes> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    #[test]
    fn test_build_route() {
        let mut route = Route::get("/country")
            .response(CannedResponse::from_status_code(123).unwrap())
            .build()
            .unwrap();

        assert_eq!(route.method(), Method::GET);
        assert_eq!(route.path().as_str(), "/country");
        assert_eq!(route.summary().to_string(), "ROUTE GET /country");

        let req = request("GET", "/country?nonce=12345&code=it&page=2");
        assert!(route.captures(&req).is_some());
        assert_eq!(route.resolve(&req).unwrap().status().as_u16(), 123);
    }

    #[test]
    fn test_incomplete_route_missing_method() {
        let err = RouteBuilder::new().path("/country").build().unwrap_err();

        assert_eq!(err.missing(), &[RouteField::Method, RouteField::Handler]);
        assert!(err.to_string().contains("parameter \"method\""));
    }

    #[test]
    fn test_incomplete_route_reports_all_fields() {
        let err = RouteBuilder::new().build().unwrap_err();
        assert_eq!(
            err,
            RouteError::IncompleteRoute {
                missing: vec![RouteField::Method, RouteField::Path, RouteField::Handler],
            }
        );
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let err = RouteBuilder::new()
            .method("")
            .path("")
            .response(CannedResponse::ok("x"))
            .build()
            .unwrap_err();
        assert_eq!(err.missing(), &[RouteField::Method, RouteField::Path]);
    }

    #[test]
    fn test_invalid_method() {
        let err = Route::new("GE T", "/country", CannedResponse::ok("x")).unwrap_err();
        assert_eq!(err, RouteError::InvalidMethod("GE T".into()));
    }

    #[test]
    fn test_method_must_match_exactly() {
        let route = Route::new("PATCH", "/lazy/builder", CannedResponse::ok("")).unwrap();

        assert!(route.captures(&request("PATCH", "/lazy/builder")).is_some());
        assert!(route.captures(&request("GET", "/lazy/builder")).is_none());
        assert!(route.captures(&request("patch", "/lazy/builder")).is_none());
    }

    #[test]
    fn test_file_response_builder() {
        assert!(Route::get("/country/DE/json")
            .file_response("/no/such/fixture.json", StatusCode::OK)
            .is_err());
    }
}
