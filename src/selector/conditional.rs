//! Query-parameter conditional selector.
//!
//! # Responsibilities
//! - Hold ordered (required parameters → response) rules
//! - Pick the first rule fully satisfied by the request's query
//! - Fall back to the default response, or 404 when none is set
//!
//! # Design Decisions
//! - Registration order is priority; no best-match scoring
//! - Never fails: the fallback always satisfies the request

use bytes::Bytes;
use http::{Request, Response};

use crate::error::DispatchError;
use crate::http::response::CannedResponse;
use crate::routing::query::QueryParams;
use crate::selector::Resolve;

/// One rule: every required parameter must be present and equal.
#[derive(Debug, Clone)]
pub struct ConditionalResponse {
    required: QueryParams,
    response: CannedResponse,
}

impl ConditionalResponse {
    pub fn new(required: QueryParams, response: CannedResponse) -> Self {
        Self { required, response }
    }

    pub fn matches(&self, params: &QueryParams) -> bool {
        params.contains_all(&self.required)
    }

    pub fn required(&self) -> &QueryParams {
        &self.required
    }

    pub fn response(&self) -> &CannedResponse {
        &self.response
    }
}

#[derive(Debug, Clone, Default)]
pub struct Conditional {
    rules: Vec<ConditionalResponse>,
    default: Option<CannedResponse>,
}

impl Conditional {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule from a query string such as `code=it&page=2`.
    pub fn when(self, query: &str, response: CannedResponse) -> Self {
        self.when_params(QueryParams::parse(query), response)
    }

    pub fn when_params(mut self, required: QueryParams, response: CannedResponse) -> Self {
        self.rules.push(ConditionalResponse::new(required, response));
        self
    }

    /// Response used when no rule matches. Replaces any earlier default.
    pub fn default_response(mut self, response: CannedResponse) -> Self {
        self.default = Some(response);
        self
    }

    pub fn rules(&self) -> &[ConditionalResponse] {
        &self.rules
    }

    /// Picks the canned response for the given parameters.
    pub fn select(&self, params: &QueryParams) -> Option<&CannedResponse> {
        self.rules
            .iter()
            .find(|rule| rule.matches(params))
            .map(ConditionalResponse::response)
            .or(self.default.as_ref())
    }
}

impl Resolve for Conditional {
    fn resolve(&mut self, req: &Request<Bytes>) -> Result<Response<Bytes>, DispatchError> {
        let params = QueryParams::from_uri(req.uri());
        let response = match self.select(&params) {
            Some(canned) => canned.to_response(),
            None => CannedResponse::not_found().to_response(),
        };
        Ok(response)
    }
}
