//! Streaming chat completions
//!
//! A stream always opens with a role chunk. Content chunks follow in event
//! order, then a stop chunk and the `[DONE]` sentinel. A failure anywhere
//! after the role chunk is reported as one in-band error frame followed by
//! `[DONE]`. Server shutdown closes an open stream with the stop chunk and
//! `[DONE]`; a client hang-up drops the stream and cancels the workflow.

use std::sync::Arc;

use async_stream::stream;
use flowserve_workflow::{EventKind, Role, Workflow, WorkflowEvent, WorkflowRequest};
use futures_util::{Stream, StreamExt};

use crate::completion::{completion_id, unix_now};
use crate::error::GatewayError;
use crate::protocol::openai::{ChatCompletionStreamChoice, ChatCompletionStreamResponse, DeltaMessage};
use crate::state::GatewayState;

/// One unit of a streamed response, before wire encoding
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    /// A `chat.completion.chunk` object
    Chunk(ChatCompletionStreamResponse),
    /// In-band failure message
    Error(String),
    /// End-of-stream sentinel
    Done,
}

/// Fields shared by every chunk of one stream
struct ChunkHeader {
    id: String,
    created: u64,
    model: String,
}

impl ChunkHeader {
    fn new(model: String) -> Self {
        Self {
            id: completion_id(),
            created: unix_now(),
            model,
        }
    }

    fn chunk(&self, delta: DeltaMessage, finish_reason: Option<&str>) -> StreamFrame {
        StreamFrame::Chunk(ChatCompletionStreamResponse {
            id: self.id.clone(),
            object: "chat.completion.chunk".to_owned(),
            created: self.created,
            model: self.model.clone(),
            choices: vec![ChatCompletionStreamChoice {
                index: 0,
                delta,
                finish_reason: finish_reason.map(str::to_owned),
            }],
        })
    }

    fn role(&self) -> StreamFrame {
        self.chunk(
            DeltaMessage {
                role: Some(Role::Assistant),
                content: None,
            },
            None,
        )
    }

    fn content(&self, text: String) -> StreamFrame {
        self.chunk(
            DeltaMessage {
                role: None,
                content: Some(text),
            },
            None,
        )
    }

    fn stop(&self) -> StreamFrame {
        self.chunk(DeltaMessage::default(), Some("stop"))
    }
}

impl GatewayState {
    /// Open a frame stream for the workflow registered as `model`
    ///
    /// The model is resolved eagerly; the workflow itself only starts when
    /// the returned stream is first polled.
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFound` if no workflow is registered as `model`
    pub fn stream(
        &self,
        model: &str,
        request: WorkflowRequest,
    ) -> Result<impl Stream<Item = StreamFrame> + Send + 'static, GatewayError> {
        let workflow = self.registry.resolve(model)?;
        Ok(frames(model.to_owned(), workflow, request))
    }
}

/// Drive `workflow` as an event feed and turn it into response frames
///
/// Dropping the returned stream cancels `request.cancel`.
pub fn frames(
    model: String,
    workflow: Arc<dyn Workflow>,
    request: WorkflowRequest,
) -> impl Stream<Item = StreamFrame> + Send + 'static {
    let header = ChunkHeader::new(model);
    let cancel = request.cancel.clone();
    let step = workflow.generation_step().to_owned();

    stream! {
        let _cancel_on_drop = cancel.clone().drop_guard();

        yield header.role();

        let mut chunks = 0_usize;
        let outcome = match workflow.stream_events(request).await {
            Ok(events) => {
                let mut events = Box::pin(events.take_until(cancel.clone().cancelled_owned()));
                let mut outcome = Ok(());

                while let Some(event) = events.next().await {
                    match event {
                        Ok(event) => {
                            if let Some(text) = generated_text(event, &step) {
                                chunks += 1;
                                yield header.content(text);
                            }
                        }
                        Err(e) => {
                            outcome = Err(e);
                            break;
                        }
                    }
                }

                outcome
            }
            Err(e) => Err(e),
        };

        // Still polled after cancellation only when the server shuts down
        if cancel.is_cancelled() {
            tracing::info!(model = %header.model, chunks, "stream closed by shutdown");
            yield header.stop();
        } else {
            match outcome {
                Ok(()) => {
                    tracing::info!(model = %header.model, chunks, "stream finished");
                    yield header.stop();
                }
                Err(e) => {
                    tracing::warn!(model = %header.model, chunks, error = %e, "stream failed");
                    yield StreamFrame::Error(e.to_string());
                }
            }
        }

        yield StreamFrame::Done;
    }
}

/// Text carried by `event` if it is generation output of `step`
fn generated_text(event: WorkflowEvent, step: &str) -> Option<String> {
    if event.kind != EventKind::ChatModelStream || event.step.as_deref() != Some(step) {
        return None;
    }

    event.chunk.filter(|text| !text.is_empty())
}
