//! Canned responses.
//!
//! # Responsibilities
//! - Build responses from a status, headers and a string or file body
//! - Hand out a fresh `http::Response` for every dispatch
//!
//! # Design Decisions
//! - Bodies are fully buffered; files are read once, at build time
//! - A canned response is plain data (`Clone`), never shared mutably
//! - Construction errors surface during test setup, not at dispatch

use std::fs;
use std::path::Path;

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Response, StatusCode};

use crate::error::ResponseError;

/// A pre-built response returned verbatim by a selector.
#[derive(Debug, Clone, PartialEq)]
pub struct CannedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl CannedResponse {
    /// An empty-bodied response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// An empty-bodied response from a numeric status code.
    pub fn from_status_code(code: u16) -> Result<Self, ResponseError> {
        let status = StatusCode::from_u16(code).map_err(|_| ResponseError::InvalidStatus(code))?;
        Ok(Self::new(status))
    }

    /// `200 OK` carrying the given content.
    pub fn ok(content: impl Into<String>) -> Self {
        Self::from_string(content, StatusCode::OK)
    }

    pub fn from_string(content: impl Into<String>, status: StatusCode) -> Self {
        Self::new(status).with_body(Bytes::from(content.into()))
    }

    /// Reads `path` once and keeps its contents as the body.
    pub fn from_file(path: impl AsRef<Path>, status: StatusCode) -> Result<Self, ResponseError> {
        let path = path.as_ref();
        let body = fs::read(path).map_err(|source| ResponseError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(status).with_body(Bytes::from(body)))
    }

    /// Fallback used when nothing else was configured.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Appends a header; repeated names keep every value.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a header given as strings, validating both parts.
    pub fn try_with_header(self, name: &str, value: &str) -> Result<Self, ResponseError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ResponseError::InvalidHeader {
                name: name.to_string(),
            }
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|_| ResponseError::InvalidHeader {
            name: name.to_string(),
        })?;
        Ok(self.with_header(header_name, header_value))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Materialises a new response. `Bytes` clones share the buffer.
    pub fn to_response(&self) -> Response<Bytes> {
        let mut response = Response::new(self.body.clone());
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();
        response
    }
}

impl From<StatusCode> for CannedResponse {
    fn from(status: StatusCode) -> Self {
        Self::new(status)
    }
}
