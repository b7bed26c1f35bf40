use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::WorkflowError;
use crate::event::EventStream;
use crate::message::{Message, ToolDefinition};

/// Step whose chat model output is streamed to clients unless a workflow
/// names another one
pub const DEFAULT_GENERATION_STEP: &str = "generate";

/// Sampling parameters supplied by the client
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// Input for one workflow run
///
/// Owned by the run; workflows never keep history between requests.
#[derive(Debug, Clone)]
pub struct WorkflowRequest {
    /// Conversation history, oldest first
    pub messages: Vec<Message>,
    /// Client sampling parameters
    pub params: GenerationParams,
    /// Tools offered by the client
    pub tools: Vec<ToolDefinition>,
    /// Cancelled when the consumer goes away; background work must stop
    pub cancel: CancellationToken,
}

impl WorkflowRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            params: GenerationParams::default(),
            tools: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Content of the most recent message, if any
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

/// A named unit that turns a message history into new messages
///
/// The registry shares one instance across all requests, so implementations
/// must not keep per-request state.
#[async_trait]
pub trait Workflow: Send + Sync {
    /// Implementation name, used in logs
    fn kind(&self) -> &str;

    /// Step whose `ChatModelStream` events carry the reply text
    fn generation_step(&self) -> &str {
        DEFAULT_GENERATION_STEP
    }

    /// Run to completion and return the messages produced, oldest first
    async fn invoke(&self, request: WorkflowRequest) -> Result<Vec<Message>, WorkflowError>;

    /// Run incrementally, yielding events in the order they happen
    async fn stream_events(&self, request: WorkflowRequest) -> Result<EventStream, WorkflowError>;
}
