//! Scripted workflow used by the unit tests of this crate

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use flowserve_workflow::{EventStream, Message, Workflow, WorkflowError, WorkflowEvent, WorkflowRequest};
use futures_util::{StreamExt, stream};
use tokio_util::sync::CancellationToken;

#[derive(Default)]
pub struct ScriptedWorkflow {
    pub reply: Vec<Message>,
    pub invoke_error: Option<String>,
    pub events: Vec<Result<WorkflowEvent, String>>,
    pub start_error: Option<String>,
    /// Keep the feed open after the scripted events
    pub hang: bool,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<WorkflowRequest>>,
}

impl ScriptedWorkflow {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: vec![Message::assistant(text)],
            ..Self::default()
        }
    }

    pub fn streaming(events: Vec<Result<WorkflowEvent, String>>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.last_request.lock().unwrap().as_ref().unwrap().cancel.clone()
    }

    fn record(&self, request: WorkflowRequest) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
    }
}

#[async_trait]
impl Workflow for ScriptedWorkflow {
    fn kind(&self) -> &'static str {
        "scripted"
    }

    async fn invoke(&self, request: WorkflowRequest) -> Result<Vec<Message>, WorkflowError> {
        self.record(request);

        match &self.invoke_error {
            Some(message) => Err(WorkflowError::step("generate", message.clone())),
            None => Ok(self.reply.clone()),
        }
    }

    async fn stream_events(&self, request: WorkflowRequest) -> Result<EventStream, WorkflowError> {
        self.record(request);

        if let Some(message) = &self.start_error {
            return Err(WorkflowError::Upstream(message.clone()));
        }

        let events = stream::iter(
            self.events
                .clone()
                .into_iter()
                .map(|event| event.map_err(|message| WorkflowError::step("generate", message))),
        );

        if self.hang {
            Ok(Box::pin(events.chain(stream::pending())))
        } else {
            Ok(Box::pin(events))
        }
    }
}
