use std::pin::Pin;

use futures_util::Stream;
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Ordered feed of events produced by one workflow run
pub type EventStream = Pin<Box<dyn Stream<Item = Result<WorkflowEvent, WorkflowError>> + Send>>;

/// What happened inside the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A step began executing
    StepStart,
    /// A chat model inside a step produced a text fragment
    ChatModelStream,
    /// A step finished
    StepEnd,
}

/// Single event emitted while a workflow runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEvent {
    /// Event kind
    pub kind: EventKind,
    /// Step the event originates from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// Generated text fragment, for `ChatModelStream` events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk: Option<String>,
}

impl WorkflowEvent {
    pub fn step_start(step: impl Into<String>) -> Self {
        Self {
            kind: EventKind::StepStart,
            step: Some(step.into()),
            chunk: None,
        }
    }

    pub fn step_end(step: impl Into<String>) -> Self {
        Self {
            kind: EventKind::StepEnd,
            step: Some(step.into()),
            chunk: None,
        }
    }

    /// Text fragment generated by a chat model within `step`
    pub fn chunk(step: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: EventKind::ChatModelStream,
            step: Some(step.into()),
            chunk: Some(text.into()),
        }
    }
}
