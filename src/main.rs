//! route-mock: inspect and exercise mock route files.
//!
//! # Commands
//!
//! ```text
//! route-mock check   <config>                 validate, then list routes
//! route-mock routes  <config>                 list routes in priority order
//! route-mock resolve <config> <METHOD> <TARGET> [-H name:value]... [-d body] [--times N]
//!                                             dispatch and print each outcome as JSON
//! ```

use std::path::{Path, PathBuf};

use bytes::Bytes;
use clap::{Parser, Subcommand};
use http::{Method, Request, Response};
use serde_json::{json, Map, Value};

use http_route_mock::config::loader::{base_dir, load_config};
use http_route_mock::http::request::parse_target;
use http_route_mock::observability::logging;
use http_route_mock::MockConfig;

#[derive(Parser)]
#[command(name = "route-mock")]
#[command(about = "Validate and exercise mocked HTTP routes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and build every route
    Check { config: PathBuf },
    /// List declared routes in priority order
    Routes { config: PathBuf },
    /// Dispatch a request against the configured routes
    Resolve {
        config: PathBuf,
        method: String,
        target: String,
        /// Request header, `name:value`; repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Request body
        #[arg(short = 'd', long = "data")]
        data: Option<String>,
        /// Number of times to send the request
        #[arg(long, default_value_t = 1)]
        times: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let (mock, dir) = load(&config)?;
            let routes = mock.build_routes(dir)?;
            println!("{}: {} route(s) OK", config.display(), routes.len());
            for route in &routes {
                println!("{}", route.summary());
            }
        }
        Commands::Routes { config } => {
            let (mock, _) = load(&config)?;
            for route in &mock.routes {
                let name = route.name.as_deref().unwrap_or("-");
                println!("ROUTE {} {} ({})", route.method, route.path, name);
            }
        }
        Commands::Resolve {
            config,
            method,
            target,
            headers,
            data,
            times,
        } => {
            let (mock, dir) = load(&config)?;
            let mut client = mock.build_client(dir)?;
            let method = Method::from_bytes(method.as_bytes())?;
            let uri = parse_target(&target)?;
            let body = Bytes::from(data.unwrap_or_default());

            for call in 1..=times {
                let mut builder = Request::builder().method(method.clone()).uri(uri.clone());
                for header in &headers {
                    let (name, value) = header
                        .split_once(':')
                        .ok_or_else(|| format!("header {:?} is not name:value", header))?;
                    builder = builder.header(name.trim(), value.trim());
                }
                let request = builder.body(body.clone())?;

                let outcome = match client.send(request) {
                    Ok(response) => json!({ "call": call, "response": describe(&response) }),
                    Err(err) => json!({ "call": call, "kind": err.kind(), "error": err.to_string() }),
                };
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<(MockConfig, &Path), Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    if let Err(err) = logging::try_init(&config.logging) {
        eprintln!("logging disabled: {}", err);
    }
    tracing::debug!(path = %path.display(), routes = config.routes.len(), "Configuration loaded");
    Ok((config, base_dir(path)))
}

fn describe(response: &Response<Bytes>) -> Value {
    let headers: Map<String, Value> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            (name.to_string(), Value::String(value))
        })
        .collect();

    let body = match serde_json::from_slice::<Value>(response.body()) {
        Ok(parsed) => parsed,
        Err(_) => Value::String(String::from_utf8_lossy(response.body()).into_owned()),
    };

    json!({
        "status": response.status().as_u16(),
        "headers": headers,
        "body": body,
    })
}
