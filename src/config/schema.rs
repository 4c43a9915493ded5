//! Configuration schema definitions.
//!
//! This module defines the file format for declaring mocked routes.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for a mocked client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MockConfig {
    /// Log level and output format.
    pub logging: LoggingConfig,

    /// Client middleware switches.
    pub client: ClientConfig,

    /// Route definitions, in priority order.
    pub routes: Vec<RouteConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`info`, `http_route_mock=debug`, ...).
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Turn 4xx/5xx responses into errors.
    pub http_errors: bool,

    /// Attach an `x-request-id` header to every request.
    pub request_id: bool,

    /// Headers added to every request that does not already carry them.
    pub default_headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http_errors: true,
            request_id: false,
            default_headers: BTreeMap::new(),
        }
    }
}

/// One mocked route.
///
/// Exactly one of `response`, `sequence` or `conditional` must be set.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RouteConfig {
    /// Route identifier for logging and error messages.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub method: String,

    #[serde(default)]
    pub path: String,

    /// Fixed response.
    #[serde(default)]
    pub response: Option<ResponseConfig>,

    /// Responses returned one per call, in order.
    #[serde(default)]
    pub sequence: Option<Vec<ResponseConfig>>,

    /// Responses selected by query string.
    #[serde(default)]
    pub conditional: Option<Vec<ConditionalConfig>>,

    /// Fallback for `conditional` routes (404 when absent).
    #[serde(default)]
    pub default: Option<ResponseConfig>,
}

impl RouteConfig {
    /// Name used in diagnostics: the configured one, or `METHOD path`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", self.method, self.path),
        }
    }
}

/// A canned response as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseConfig {
    #[serde(default = "default_status")]
    pub status: u16,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Literal body.
    #[serde(default)]
    pub body: Option<String>,

    /// Inline JSON body, serialised as written.
    #[serde(default)]
    pub json: Option<serde_json::Value>,

    /// Body file, relative to the config file's directory.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            status: default_status(),
            headers: BTreeMap::new(),
            body: None,
            json: None,
            file: None,
        }
    }
}

fn default_status() -> u16 {
    200
}

/// A query-string rule of a conditional route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConditionalConfig {
    /// Required parameters, e.g. `"code=de&page=2"`.
    pub query: String,

    #[serde(flatten)]
    pub response: ResponseConfig,
}
