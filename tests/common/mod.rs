//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_route_mock::{CannedResponse, Conditional, MockClient, Route};

pub const ITALY: &str = r#"{"id":"+39","code":"IT","name":"Italy"}"#;
pub const GERMANY: &str = r#"{"id":"+49","code":"DE","name":"Germany"}"#;

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The country routes most tests run against.
pub fn country_routes() -> Vec<Route> {
    vec![
        Route::get("/country/")
            .respond_with(
                Conditional::new()
                    .when("code=de", CannedResponse::ok(GERMANY))
                    .when("code=it", CannedResponse::ok(ITALY))
                    .default_response(
                        CannedResponse::from_file(fixture("countries.json"), StatusCode::OK).unwrap(),
                    ),
            )
            .build()
            .unwrap(),
        Route::get("/country/IT")
            .response(CannedResponse::ok(ITALY))
            .build()
            .unwrap(),
        Route::get("/country/DE/json")
            .file_response(fixture("country.json"), StatusCode::OK)
            .unwrap()
            .build()
            .unwrap(),
        Route::get("/admin/dashboard")
            .response(CannedResponse::new(StatusCode::UNAUTHORIZED))
            .build()
            .unwrap(),
        Route::get("/slow/api")
            .string_response("Gateway timeout", StatusCode::GATEWAY_TIMEOUT)
            .build()
            .unwrap(),
    ]
}

pub fn country_client() -> MockClient {
    MockClient::new(country_routes())
}

/// A request with the given method, target and body.
pub fn request(method: Method, uri: &str, body: &'static str) -> Request<Bytes> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::from_static(body.as_bytes()))
        .unwrap()
}

pub fn body_str(body: &Bytes) -> &str {
    std::str::from_utf8(body).unwrap()
}
