//! Scripted workflows with predictable behavior

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_stream::stream;
use async_trait::async_trait;
use flowserve_workflow::{EventStream, Message, Workflow, WorkflowError, WorkflowEvent, WorkflowRequest};
use tokio_util::sync::CancellationToken;

/// Workflow that replays a fixed script
#[derive(Default)]
pub struct ScriptedWorkflow {
    reply: Option<String>,
    invoke_error: Option<String>,
    chunks: Vec<String>,
    stream_error: Option<String>,
    delay: Option<Duration>,
    endless: bool,
    invocations: AtomicUsize,
    tokens: Mutex<Vec<CancellationToken>>,
}

impl ScriptedWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `text` when invoked
    pub fn replying(mut self, text: &str) -> Self {
        self.reply = Some(text.to_owned());
        self
    }

    /// Fail every invocation with `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.invoke_error = Some(message.to_owned());
        self
    }

    /// Stream these chunks from the `generate` step
    pub fn streaming(mut self, chunks: &[&str]) -> Self {
        self.chunks = chunks.iter().map(|c| (*c).to_owned()).collect();
        self
    }

    /// Fail the feed with `message` after the scripted chunks
    pub fn failing_stream(mut self, message: &str) -> Self {
        self.stream_error = Some(message.to_owned());
        self
    }

    /// Sleep before every chunk
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Keep producing `tick` chunks after the script until cancelled
    pub fn endless(mut self) -> Self {
        self.endless = true;
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of `invoke` and `stream_events` calls so far
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Cancellation token of the most recent run
    pub fn last_token(&self) -> Option<CancellationToken> {
        self.tokens.lock().unwrap().last().cloned()
    }

    fn record(&self, request: &WorkflowRequest) {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(request.cancel.clone());
    }
}

#[async_trait]
impl Workflow for ScriptedWorkflow {
    fn kind(&self) -> &'static str {
        "scripted"
    }

    async fn invoke(&self, request: WorkflowRequest) -> Result<Vec<Message>, WorkflowError> {
        self.record(&request);

        if let Some(message) = &self.invoke_error {
            return Err(WorkflowError::step("generate", message.clone()));
        }

        Ok(self.reply.iter().map(Message::assistant).collect())
    }

    async fn stream_events(&self, request: WorkflowRequest) -> Result<EventStream, WorkflowError> {
        self.record(&request);

        let chunks = self.chunks.clone();
        let stream_error = self.stream_error.clone();
        let delay = self.delay;
        let endless = self.endless;

        let events = stream! {
            yield Ok(WorkflowEvent::step_start("generate"));

            for chunk in chunks {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                yield Ok(WorkflowEvent::chunk("generate", chunk));
            }

            if let Some(message) = stream_error {
                yield Err(WorkflowError::step("generate", message));
            } else if endless {
                loop {
                    tokio::time::sleep(delay.unwrap_or(Duration::from_millis(10))).await;
                    yield Ok(WorkflowEvent::chunk("generate", "tick "));
                }
            } else {
                yield Ok(WorkflowEvent::step_end("generate"));
            }
        };

        Ok(Box::pin(events))
    }
}
