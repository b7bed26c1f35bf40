//! Single-step workflow backed by an OpenAI-compatible chat model
//!
//! The `generate` step prompts the upstream model with the configured system
//! prompt and the latest message of the conversation.

use std::future::ready;

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use flowserve_config::ChatModelConfig;
use futures_util::{StreamExt, stream};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::event::{EventStream, WorkflowEvent};
use crate::message::Message;
use crate::workflow::{DEFAULT_GENERATION_STEP, Workflow, WorkflowRequest};

/// Chat model workflow with a single `generate` step
pub struct ChatModelWorkflow {
    client: Client,
    completions_url: String,
    api_key: Option<SecretString>,
    model: String,
    system_prompt: String,
    temperature: f64,
    max_tokens: Option<u32>,
}

impl ChatModelWorkflow {
    /// Create from configuration
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Internal` if the HTTP client cannot be built
    pub fn new(config: &ChatModelConfig) -> Result<Self, WorkflowError> {
        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        let base = config.base_url.as_str().trim_end_matches('/');

        Ok(Self {
            client,
            completions_url: format!("{base}/chat/completions"),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the upstream request body for the `generate` step
    fn upstream_request(&self, request: &WorkflowRequest, stream: bool) -> Result<UpstreamRequest, WorkflowError> {
        let question = request
            .last_content()
            .ok_or_else(|| WorkflowError::InvalidInput("conversation has no messages".to_owned()))?;

        Ok(UpstreamRequest {
            model: self.model.clone(),
            messages: vec![
                UpstreamMessage {
                    role: "system".to_owned(),
                    content: Some(self.system_prompt.clone()),
                },
                UpstreamMessage {
                    role: "user".to_owned(),
                    content: Some(question.to_owned()),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens.or(request.params.max_tokens),
            stream,
        })
    }

    async fn send(&self, body: &UpstreamRequest) -> Result<reqwest::Response, WorkflowError> {
        let mut builder = self.client.post(&self.completions_url).json(body);

        if let Some(key) = &self.api_key
            && !key.expose_secret().is_empty()
        {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(model = %self.model, error = %e, "upstream request failed");
            WorkflowError::Upstream(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, %status, "upstream returned error");
            return Err(WorkflowError::Upstream(format!("chat model returned {status}: {body}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl Workflow for ChatModelWorkflow {
    fn kind(&self) -> &'static str {
        "chat_model"
    }

    async fn invoke(&self, request: WorkflowRequest) -> Result<Vec<Message>, WorkflowError> {
        let body = self.upstream_request(&request, false)?;
        let response = self.send(&body).await?;

        let completion: UpstreamResponse = response
            .json()
            .await
            .map_err(|e| WorkflowError::Upstream(format!("failed to parse response: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(vec![Message::assistant(content)])
    }

    async fn stream_events(&self, request: WorkflowRequest) -> Result<EventStream, WorkflowError> {
        let body = self.upstream_request(&request, true)?;
        let response = self.send(&body).await?;

        let chunks = response
            .bytes_stream()
            .eventsource()
            .take_while(|result| ready(!matches!(result, Ok(event) if event.data.trim() == "[DONE]")))
            .filter_map(|result| {
                ready(match result {
                    Ok(event) => chunk_content(&event.data)
                        .map(|text| Ok(WorkflowEvent::chunk(DEFAULT_GENERATION_STEP, text))),
                    Err(e) => Some(Err(WorkflowError::Upstream(format!("stream interrupted: {e}")))),
                })
            });

        let events = stream::once(ready(Ok(WorkflowEvent::step_start(DEFAULT_GENERATION_STEP))))
            .chain(chunks)
            .chain(stream::once(ready(Ok(WorkflowEvent::step_end(DEFAULT_GENERATION_STEP)))))
            .take_until(request.cancel.cancelled_owned());

        Ok(Box::pin(events))
    }
}

/// Extract the text delta from one upstream SSE `data` payload
///
/// Payloads that do not parse or carry no text yield `None`.
fn chunk_content(data: &str) -> Option<String> {
    match serde_json::from_str::<UpstreamChunk>(data.trim()) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .filter(|text| !text.is_empty()),
        Err(e) => {
            tracing::debug!(error = %e, data = %data, "skipping unparseable upstream chunk");
            None
        }
    }
}

// -- Upstream wire types --

#[derive(Debug, Serialize)]
struct UpstreamRequest {
    model: String,
    messages: Vec<UpstreamMessage>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct UpstreamMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamResponse {
    #[serde(default)]
    choices: Vec<UpstreamChoice>,
}

#[derive(Debug, Deserialize)]
struct UpstreamChoice {
    message: UpstreamMessage,
}

#[derive(Debug, Deserialize)]
struct UpstreamChunk {
    #[serde(default)]
    choices: Vec<UpstreamChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct UpstreamChunkChoice {
    #[serde(default)]
    delta: UpstreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamDelta {
    #[serde(default)]
    content: Option<String>,
}
