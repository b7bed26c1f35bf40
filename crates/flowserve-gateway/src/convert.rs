//! Conversion between wire messages and workflow messages

use flowserve_workflow::{GenerationParams, Message, Role, ToolDefinition, WorkflowRequest};
use tokio_util::sync::CancellationToken;

use crate::protocol::openai::{ChatCompletionRequest, ChatMessage, Tool};

/// Convert wire messages into the history a workflow consumes
///
/// Order, role and name are kept as-is; `null` content becomes `""`.
pub fn to_internal(messages: &[ChatMessage]) -> Vec<Message> {
    messages
        .iter()
        .map(|message| Message {
            role: message.role,
            content: message.content.clone().unwrap_or_default(),
            name: message.name.clone(),
        })
        .collect()
}

/// Text of a workflow message as sent back to the client
pub fn from_internal(message: &Message) -> String {
    message.content.clone()
}

/// Wire assistant message carrying `content`
pub fn assistant_message(content: String) -> ChatMessage {
    ChatMessage {
        role: Role::Assistant,
        content: Some(content),
        name: None,
    }
}

fn tool_to_internal(tool: &Tool) -> ToolDefinition {
    ToolDefinition {
        name: tool.function.name.clone(),
        description: tool.function.description.clone(),
        parameters: tool.function.parameters.clone(),
    }
}

/// Build the workflow input for a validated request
pub fn workflow_request(request: &ChatCompletionRequest, cancel: CancellationToken) -> WorkflowRequest {
    WorkflowRequest {
        messages: to_internal(&request.messages),
        params: GenerationParams {
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        },
        tools: request.tools.iter().flatten().map(tool_to_internal).collect(),
        cancel,
    }
}
