//! Non-streaming chat completions

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use flowserve_workflow::{Workflow, WorkflowRequest};

use crate::convert;
use crate::error::GatewayError;
use crate::protocol::openai::{ChatCompletionChoice, ChatCompletionResponse, UsageInfo};
use crate::state::GatewayState;
use crate::usage;

/// Reply text and usage of one finished workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Text of the last message the workflow produced, `""` if none
    pub text: String,
    pub usage: UsageInfo,
}

impl Completion {
    /// Assemble the wire response for `model`
    pub fn into_response(self, model: String) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: completion_id(),
            object: "chat.completion".to_owned(),
            created: unix_now(),
            model,
            choices: vec![ChatCompletionChoice {
                index: 0,
                message: convert::assistant_message(self.text),
                finish_reason: Some("stop".to_owned()),
            }],
            usage: self.usage,
        }
    }
}

impl GatewayState {
    /// Run the workflow registered as `model` to completion
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFound` for unknown models, or the workflow's own
    /// failure. Nothing is retried.
    pub async fn complete(&self, model: &str, request: WorkflowRequest) -> Result<Completion, GatewayError> {
        let workflow = self.registry.resolve(model)?;
        run(model, workflow.as_ref(), request).await
    }
}

async fn run(model: &str, workflow: &dyn Workflow, request: WorkflowRequest) -> Result<Completion, GatewayError> {
    let started = Instant::now();
    let messages = request.messages.len();
    let prompt_tokens = usage::prompt_tokens(&request.messages);

    // Dropping the handler future cancels whatever the workflow left running
    let _cancel_on_drop = request.cancel.clone().drop_guard();

    let produced = workflow.invoke(request).await.map_err(|e| {
        tracing::error!(model, kind = workflow.kind(), error = %e, "workflow invocation failed");
        e
    })?;

    let text = produced.last().map(convert::from_internal).unwrap_or_default();
    let usage = usage::usage(prompt_tokens, &text);

    tracing::info!(
        model,
        messages,
        completion_tokens = usage.completion_tokens(),
        elapsed = ?started.elapsed(),
        "completion finished"
    );

    Ok(Completion { text, usage })
}

/// Fresh response id, `chatcmpl-<uuid>`
pub(crate) fn completion_id() -> String {
    format!("chatcmpl-{}", uuid::Uuid::new_v4())
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
