//! Workflow abstraction served by the Flowserve gateway
//!
//! A workflow turns a conversation history into new messages, either in one
//! awaited call or as an ordered feed of [`WorkflowEvent`]s. Implementations
//! are independent types behind the [`Workflow`] trait; the gateway only ever
//! sees `Arc<dyn Workflow>`.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod builtin;
pub mod error;
pub mod event;
pub mod message;
pub mod workflow;

pub use builtin::build_workflow;
pub use error::WorkflowError;
pub use event::{EventKind, EventStream, WorkflowEvent};
pub use message::{Message, Role, ToolDefinition};
pub use workflow::{DEFAULT_GENERATION_STEP, GenerationParams, Workflow, WorkflowRequest};
