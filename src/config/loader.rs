//! Configuration loading from disk.
//!
//! # Responsibilities
//! - Read and parse TOML, then run semantic validation
//! - Turn route declarations into `Route`s with canned responses
//! - Assemble a ready `MockClient` from the `[client]` section
//!
//! # Design Decisions
//! - Body files are resolved against the config file's directory
//! - A `json` body gets `content-type: application/json` unless set

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use thiserror::Error;

use crate::client::MockClient;
use crate::config::schema::{MockConfig, ResponseConfig, RouteConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::error::{ResponseError, RouteError};
use crate::http::middleware::SetRequestHeader;
use crate::http::response::CannedResponse;
use crate::routing::route::Route;
use crate::selector::{Conditional, Selector, Sequential};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("route {route}: {source}")]
    Response {
        route: String,
        #[source]
        source: ResponseError,
    },

    #[error("route {route}: {source}")]
    Route {
        route: String,
        #[source]
        source: RouteError,
    },

    #[error("route {route}: cannot encode json body: {source}")]
    Json {
        route: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid default header {name:?}")]
    DefaultHeader { name: String },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MockConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<MockConfig, ConfigError> {
    let config: MockConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load a config file and build a client from it.
pub fn load_client(path: &Path) -> Result<MockClient, ConfigError> {
    let config = load_config(path)?;
    config.build_client(base_dir(path))
}

/// Directory body files of the config at `path` are resolved against.
pub fn base_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

impl MockConfig {
    /// Builds every declared route, in file order.
    pub fn build_routes(&self, base_dir: &Path) -> Result<Vec<Route>, ConfigError> {
        self.routes
            .iter()
            .map(|route| build_route(route, base_dir))
            .collect()
    }

    /// Builds a client with the declared routes and middleware switches.
    pub fn build_client(&self, base_dir: &Path) -> Result<MockClient, ConfigError> {
        let mut builder = MockClient::builder()
            .http_errors(self.client.http_errors)
            .request_id(self.client.request_id);

        for (name, value) in &self.client.default_headers {
            let invalid = || ConfigError::DefaultHeader { name: name.clone() };
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            builder = builder.middleware(SetRequestHeader::if_not_present(name, value));
        }

        Ok(builder.routes(self.build_routes(base_dir)?).build())
    }
}

fn build_route(config: &RouteConfig, base_dir: &Path) -> Result<Route, ConfigError> {
    let label = config.label();
    let response = |response: &ResponseConfig| build_response(&label, response, base_dir);

    let selector: Option<Selector> = if let Some(fixed) = &config.response {
        Some(response(fixed)?.into())
    } else if let Some(sequence) = &config.sequence {
        let responses = sequence.iter().map(response).collect::<Result<Vec<_>, _>>()?;
        Some(Sequential::new(responses).into())
    } else if let Some(rules) = &config.conditional {
        let mut conditional = Conditional::new();
        for rule in rules {
            conditional = conditional.when(&rule.query, response(&rule.response)?);
        }
        if let Some(default) = &config.default {
            conditional = conditional.default_response(response(default)?);
        }
        Some(conditional.into())
    } else {
        None
    };

    let mut builder = Route::builder()
        .method(config.method.as_str())
        .path(config.path.as_str());
    if let Some(selector) = selector {
        builder = builder.respond_with(selector);
    }
    builder.build().map_err(|source| ConfigError::Route {
        route: label.clone(),
        source,
    })
}

fn build_response(label: &str, config: &ResponseConfig, base_dir: &Path) -> Result<CannedResponse, ConfigError> {
    let wrap = |source: ResponseError| ConfigError::Response {
        route: label.to_string(),
        source,
    };

    let mut response = match &config.file {
        Some(file) => {
            let status = CannedResponse::from_status_code(config.status).map_err(wrap)?.status();
            CannedResponse::from_file(base_dir.join(file), status).map_err(wrap)?
        }
        None => CannedResponse::from_status_code(config.status).map_err(wrap)?,
    };

    if let Some(body) = &config.body {
        response = response.with_body(body.clone());
    }
    if let Some(json) = &config.json {
        let encoded = serde_json::to_vec(json).map_err(|source| ConfigError::Json {
            route: label.to_string(),
            source,
        })?;
        response = response.with_body(encoded);
        let has_content_type = config
            .headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
        if !has_content_type {
            response = response.with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
    }

    for (name, value) in &config.headers {
        response = response.try_with_header(name, value).map_err(wrap)?;
    }

    Ok(response)
}
