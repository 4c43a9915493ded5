//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store registered routes in insertion order
//! - Look up the first route matching method and path
//! - Invoke the winning route's selector
//! - Return an explicit `RouteNotFound` rather than a silent default
//!
//! # Design Decisions
//! - Insertion order is priority; no scoring or best-match heuristics
//! - O(n) scan (route counts in a test scenario are small)
//! - Deterministic: same route list and request always pick the same route

use bytes::Bytes;
use http::{Request, Response};

use crate::error::DispatchError;
use crate::routing::route::{Route, RouteSummary};

/// Ordered set of routes for one test scenario.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Appends a route; it loses to every route added before it.
    pub fn add(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.routes.iter().map(Route::summary).collect()
    }

    /// Index of the first route matching the request's method and path.
    pub fn find(&self, req: &Request<Bytes>) -> Option<usize> {
        self.routes
            .iter()
            .position(|route| route.captures(req).is_some())
    }

    /// Resolves the request against the first matching route.
    ///
    /// The request must already be normalised (origin-form URI). Path
    /// parameters captured by the route are inserted into its extensions.
    pub fn dispatch(&mut self, mut req: Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        let matched = self
            .routes
            .iter_mut()
            .find_map(|route| route.captures(&req).map(|params| (route, params)));

        match matched {
            Some((route, params)) => {
                tracing::trace!(route = %route.summary(), selector = route.selector().kind(), "Route matched");
                req.extensions_mut().insert(params);
                route.resolve(&req)
            }
            None => Err(DispatchError::RouteNotFound {
                method: req.method().to_string(),
                path: req.uri().path().to_string(),
                routes: self.summaries(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::CannedResponse;
    use crate::routing::matcher::PathParams;
    use crate::selector::Sequential;
    use http::StatusCode;

    fn request(method: &str, uri: &str) -> Request<Bytes> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    fn body(response: &Response<Bytes>) -> String {
        String::from_utf8_lossy(response.body()).into_owned()
    }

    #[test]
    fn test_first_match_wins() {
        let mut table = RouteTable::new();
        table.add(Route::new("GET", "/users/{id}", CannedResponse::ok("pattern")).unwrap());
        table.add(Route::new("GET", "/users/me", CannedResponse::ok("static")).unwrap());

        let response = table.dispatch(request("GET", "/users/me")).unwrap();
        assert_eq!(body(&response), "pattern");
        assert_eq!(table.find(&request("GET", "/users/me")), Some(0));
    }

    #[test]
    fn test_method_selects_route() {
        let mut table = RouteTable::from_routes(vec![
            Route::new("GET", "/body", CannedResponse::ok("get")).unwrap(),
            Route::new("POST", "/body", CannedResponse::ok("post")).unwrap(),
        ]);

        assert_eq!(body(&table.dispatch(request("POST", "/body")).unwrap()), "post");
        assert_eq!(body(&table.dispatch(request("GET", "/body")).unwrap()), "get");
    }

    #[test]
    fn test_route_not_found() {
        let mut table = RouteTable::from_routes(vec![
            Route::new("GET", "/country/IT", CannedResponse::ok("Italy")).unwrap(),
        ]);

        match table.dispatch(request("GET", "/not/existing/route")) {
            Err(err @ DispatchError::RouteNotFound { .. }) => {
                let message = err.to_string();
                assert!(message.contains("Mocked route GET /not/existing/route not found"));
                assert!(message.contains("ROUTE GET /country/IT"));
            }
            other => panic!("expected RouteNotFound, got {:?}", other),
        }

        // Wrong method on an existing path is also a miss
        assert!(matches!(
            table.dispatch(request("DELETE", "/country/IT")),
            Err(DispatchError::RouteNotFound { .. })
        ));
    }

    #[test]
    fn test_path_params_reach_selector() {
        let mut table = RouteTable::new();
        table.add(
            Route::get("/country/{code}")
                .handler(|req: &Request<Bytes>| {
                    let code = req
                        .extensions()
                        .get::<PathParams>()
                        .and_then(|params| params.get("code"))
                        .unwrap_or("??")
                        .to_string();
                    Ok(Response::new(Bytes::from(code)))
                })
                .build()
                .unwrap(),
        );

        assert_eq!(body(&table.dispatch(request("GET", "/country/FR")).unwrap()), "FR");
    }

    #[test]
    fn test_sequential_state_survives_dispatches() {
        let mut table = RouteTable::new();
        table.add(
            Route::new(
                "GET",
                "/poll",
                Sequential::new(vec![
                    CannedResponse::new(StatusCode::ACCEPTED),
                    CannedResponse::new(StatusCode::OK),
                ]),
            )
            .unwrap(),
        );

        assert_eq!(table.dispatch(request("GET", "/poll")).unwrap().status(), StatusCode::ACCEPTED);
        assert_eq!(table.dispatch(request("GET", "/poll")).unwrap().status(), StatusCode::OK);
        assert!(matches!(
            table.dispatch(request("GET", "/poll")),
            Err(DispatchError::TooManyConsecutiveCalls { .. })
        ));
    }
}
