//! OpenAI-compatible chat completion gateway over pluggable workflows
//!
//! Requests arrive in the `OpenAI` Chat Completions wire format, are resolved
//! against a [`WorkflowRegistry`] by their `model` field and are answered
//! either with a single JSON body or a server-sent event stream.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod completion;
pub mod convert;
pub mod error;
mod handler;
pub mod protocol;
pub mod registry;
pub mod sse;
mod state;
pub mod stream;
pub mod usage;

#[cfg(test)]
mod testing;

pub use completion::Completion;
pub use error::GatewayError;
pub use handler::gateway_router;
pub use protocol::openai::UsageInfo;
pub use registry::{ModelCard, WorkflowRegistry, WorkflowRegistryBuilder};
pub use state::GatewayState;
pub use stream::StreamFrame;
