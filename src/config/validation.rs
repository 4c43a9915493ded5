//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route declares method, path and exactly one response source
//! - Validate value ranges (status codes, header names and values)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MockConfig → Result<(), Vec<ValidationError>>
//! - Runs before any route is built
//! - File existence is not checked here; building the route reads the file

use http::header::{HeaderName, HeaderValue};
use http::{Method, StatusCode};
use thiserror::Error;

use crate::config::schema::{MockConfig, ResponseConfig, RouteConfig};

/// One problem found in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route #{index} ({route}): {problem}")]
pub struct ValidationError {
    /// Position of the route in the file, from 0.
    pub index: usize,

    /// Route label (`name`, or `METHOD path`).
    pub route: String,

    pub problem: String,
}

/// Check a parsed config and collect every problem.
pub fn validate_config(config: &MockConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, route) in config.routes.iter().enumerate() {
        let mut report = |problem: String| {
            errors.push(ValidationError {
                index,
                route: route.label(),
                problem,
            })
        };

        for problem in route_problems(route) {
            report(problem);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn route_problems(route: &RouteConfig) -> Vec<String> {
    let mut problems = Vec::new();

    if route.method.is_empty() {
        problems.push("missing method".to_string());
    } else if Method::from_bytes(route.method.as_bytes()).is_err() {
        problems.push(format!("invalid method {:?}", route.method));
    }

    if route.path.is_empty() {
        problems.push("missing path".to_string());
    }

    let sources = [
        route.response.is_some(),
        route.sequence.is_some(),
        route.conditional.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count();
    match sources {
        0 => problems.push("one of response, sequence or conditional is required".to_string()),
        1 => {}
        _ => problems.push("response, sequence and conditional are mutually exclusive".to_string()),
    }

    if route.default.is_some() && route.conditional.is_none() {
        problems.push("default is only allowed with conditional".to_string());
    }

    if let Some(response) = &route.response {
        response_problems("response", response, &mut problems);
    }
    if let Some(sequence) = &route.sequence {
        if sequence.is_empty() {
            problems.push("sequence must not be empty".to_string());
        }
        for (i, response) in sequence.iter().enumerate() {
            response_problems(&format!("sequence[{}]", i), response, &mut problems);
        }
    }
    if let Some(rules) = &route.conditional {
        for (i, rule) in rules.iter().enumerate() {
            let at = format!("conditional[{}]", i);
            if rule.query.trim_start_matches('?').is_empty() {
                problems.push(format!("{}: query must not be empty", at));
            }
            response_problems(&at, &rule.response, &mut problems);
        }
    }
    if let Some(default) = &route.default {
        response_problems("default", default, &mut problems);
    }

    problems
}

fn response_problems(at: &str, response: &ResponseConfig, problems: &mut Vec<String>) {
    if StatusCode::from_u16(response.status).is_err() {
        problems.push(format!("{}: invalid status {}", at, response.status));
    }

    let bodies = [
        response.body.is_some(),
        response.json.is_some(),
        response.file.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count();
    if bodies > 1 {
        problems.push(format!("{}: body, json and file are mutually exclusive", at));
    }

    for (name, value) in &response.headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            problems.push(format!("{}: invalid header name {:?}", at, name));
        } else if HeaderValue::from_str(value).is_err() {
            problems.push(format!("{}: invalid value for header {:?}", at, name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ConditionalConfig;

    fn route(method: &str, path: &str) -> RouteConfig {
        RouteConfig {
            method: method.to_string(),
            path: path.to_string(),
            response: Some(ResponseConfig::default()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let config = MockConfig {
            routes: vec![route("GET", "/country/IT")],
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut no_source = route("", "");
        no_source.response = None;

        let mut bad_response = route("GET", "/x");
        bad_response.response = Some(ResponseConfig {
            status: 42,
            body: Some("a".to_string()),
            file: Some("a.json".to_string()),
            ..Default::default()
        });

        let config = MockConfig {
            routes: vec![route("GET", "/ok"), no_source, bad_response],
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();

        let problems: Vec<(usize, &str)> = errors.iter().map(|e| (e.index, e.problem.as_str())).collect();
        assert_eq!(
            problems,
            vec![
                (1, "missing method"),
                (1, "missing path"),
                (1, "one of response, sequence or conditional is required"),
                (2, "response: invalid status 42"),
                (2, "response: body, json and file are mutually exclusive"),
            ]
        );
    }

    #[test]
    fn test_default_requires_conditional() {
        let mut r = route("GET", "/country/");
        r.default = Some(ResponseConfig::default());
        let config = MockConfig {
            routes: vec![r],
            ..Default::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].problem, "default is only allowed with conditional");
    }

    #[test]
    fn test_conditional_rules_checked() {
        let mut r = route("GET", "/country/");
        r.response = None;
        r.conditional = Some(vec![ConditionalConfig {
            query: String::new(),
            response: ResponseConfig::default(),
        }]);
        let config = MockConfig {
            routes: vec![r],
            ..Default::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "route #0 (GET /country/): conditional[0]: query must not be empty");
    }
}
