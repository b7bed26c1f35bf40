#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;
pub mod workflow;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use server::*;
pub use telemetry::*;
pub use workflow::*;

/// Top-level Flowserve configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Workflows exposed as models, keyed by model id in registration order
    #[serde(default)]
    pub workflows: WorkflowsConfig,
}
