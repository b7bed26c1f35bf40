//! Workflow that answers with the last message it was given

use async_trait::async_trait;
use futures_util::stream;

use crate::error::WorkflowError;
use crate::event::{EventStream, WorkflowEvent};
use crate::message::Message;
use crate::workflow::{DEFAULT_GENERATION_STEP, Workflow, WorkflowRequest};

/// Replies with the content of the last input message plus a fixed suffix
///
/// Produces no message at all for an empty history.
#[derive(Debug, Clone, Default)]
pub struct EchoWorkflow {
    suffix: String,
}

impl EchoWorkflow {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self { suffix: suffix.into() }
    }

    fn reply(&self, request: &WorkflowRequest) -> Option<String> {
        request.last_content().map(|content| format!("{content}{}", self.suffix))
    }
}

#[async_trait]
impl Workflow for EchoWorkflow {
    fn kind(&self) -> &'static str {
        "echo"
    }

    async fn invoke(&self, request: WorkflowRequest) -> Result<Vec<Message>, WorkflowError> {
        Ok(self.reply(&request).map(Message::assistant).into_iter().collect())
    }

    async fn stream_events(&self, request: WorkflowRequest) -> Result<EventStream, WorkflowError> {
        let reply = self.reply(&request).unwrap_or_default();

        let mut events = vec![WorkflowEvent::step_start(DEFAULT_GENERATION_STEP)];
        events.extend(
            reply
                .split_inclusive(char::is_whitespace)
                .map(|piece| WorkflowEvent::chunk(DEFAULT_GENERATION_STEP, piece)),
        );
        events.push(WorkflowEvent::step_end(DEFAULT_GENERATION_STEP));

        Ok(Box::pin(stream::iter(events.into_iter().map(Ok))))
    }
}
