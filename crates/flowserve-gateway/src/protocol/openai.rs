//! `OpenAI` chat completion API wire format types

use flowserve_workflow::Role;
use serde::{Deserialize, Serialize};

// -- Request types --

/// `OpenAI` chat completion request
///
/// Fields the gateway does not use (`top_p`, `stop`, ...) are accepted and
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier, resolved against the workflow registry
    pub model: String,
    /// Conversation messages, oldest first
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    /// Whether to stream the response
    #[serde(default)]
    pub stream: bool,
}

#[allow(clippy::missing_const_for_fn)]
fn default_temperature() -> f64 {
    0.7
}

/// Message within a request or response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: Role,
    /// Text content, `null` when absent
    #[serde(default)]
    pub content: Option<String>,
    /// Participant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// `OpenAI` tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool type (always "function")
    #[serde(rename = "type", default = "default_tool_type")]
    pub tool_type: String,
    /// Function specification
    pub function: FunctionDefinition,
}

fn default_tool_type() -> String {
    "function".to_owned()
}

/// `OpenAI` function specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

// -- Response types --

/// Token accounting attached to non-streaming responses
///
/// The total is always derived from its two parts, including when usage is
/// read back from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UsageParts")]
pub struct UsageInfo {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}

impl UsageInfo {
    /// Build usage from its two parts
    pub const fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Tokens in the prompt
    pub const fn prompt_tokens(&self) -> u64 {
        self.prompt_tokens
    }

    /// Tokens in the completion
    pub const fn completion_tokens(&self) -> u64 {
        self.completion_tokens
    }

    /// Sum of prompt and completion tokens
    pub const fn total_tokens(&self) -> u64 {
        self.total_tokens
    }
}

#[derive(Deserialize)]
struct UsageParts {
    prompt_tokens: u64,
    completion_tokens: u64,
}

impl From<UsageParts> for UsageInfo {
    fn from(parts: UsageParts) -> Self {
        Self::new(parts.prompt_tokens, parts.completion_tokens)
    }
}

/// `OpenAI` chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response identifier, `chatcmpl-<uuid>`
    pub id: String,
    /// Object type (always "chat.completion")
    pub object: String,
    /// Unix timestamp of creation
    pub created: u64,
    /// Model that produced the response
    pub model: String,
    /// Completion choices
    pub choices: Vec<ChatCompletionChoice>,
    /// Token usage statistics
    pub usage: UsageInfo,
}

/// Single choice in a chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    /// Choice index
    pub index: u32,
    /// Generated message
    pub message: ChatMessage,
    /// Reason generation stopped
    pub finish_reason: Option<String>,
}

// -- Streaming types --

/// `OpenAI` streaming chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionStreamResponse {
    /// Response identifier, shared by every chunk of one stream
    pub id: String,
    /// Object type (always "chat.completion.chunk")
    pub object: String,
    /// Unix timestamp of creation, shared by every chunk of one stream
    pub created: u64,
    /// Model that produced the chunk
    pub model: String,
    /// Streaming choices
    pub choices: Vec<ChatCompletionStreamChoice>,
}

/// Single choice in a streaming chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionStreamChoice {
    /// Choice index
    pub index: u32,
    /// Incremental content
    pub delta: DeltaMessage,
    /// Reason generation stopped, `null` until the last chunk
    pub finish_reason: Option<String>,
}

/// Incremental message content in a streaming chunk
///
/// Absent fields are omitted, so an empty delta serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaMessage {
    /// Role (only in the first chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Content fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

// -- Model listing --

/// Model exposed by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Model identifier
    pub id: String,
    /// Object type (always "model")
    pub object: String,
    /// Unix timestamp of creation
    pub created: u64,
    /// Owner organization
    pub owned_by: String,
    /// Root model identifier
    pub root: String,
    /// Parent model identifier
    pub parent: Option<String>,
    /// Maximum context length
    pub max_model_len: u32,
    /// Access permissions
    pub permission: Vec<ModelPermission>,
}

/// Static permission record attached to every model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ModelPermission {
    /// Permission identifier, `modelperm-<hex>`
    pub id: String,
    /// Object type (always "model_permission")
    pub object: String,
    /// Unix timestamp of creation
    pub created: u64,
    pub allow_create_engine: bool,
    pub allow_sampling: bool,
    pub allow_logprobs: bool,
    pub allow_search_indices: bool,
    pub allow_view: bool,
    pub allow_fine_tuning: bool,
    pub organization: String,
    pub group: Option<String>,
    pub is_blocking: bool,
}

impl ModelPermission {
    /// The permission record every served model carries
    pub fn standard(created: u64) -> Self {
        Self {
            id: format!("modelperm-{}", uuid::Uuid::new_v4().simple()),
            object: "model_permission".to_owned(),
            created,
            allow_create_engine: false,
            allow_sampling: true,
            allow_logprobs: true,
            allow_search_indices: false,
            allow_view: true,
            allow_fine_tuning: false,
            organization: "*".to_owned(),
            group: None,
            is_blocking: false,
        }
    }
}

/// Model list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    /// Object type (always "list")
    pub object: String,
    /// Available models
    pub data: Vec<Model>,
}
