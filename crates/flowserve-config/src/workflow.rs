use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Workflows keyed by the model id clients use to select them
///
/// Iteration order is file order, which is also registration order.
pub type WorkflowsConfig = IndexMap<String, WorkflowConfig>;

/// A single workflow exposed as a model
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Which workflow implementation to build
    #[serde(flatten)]
    pub kind: WorkflowKind,
    /// Owner reported by the model listing
    #[serde(default)]
    pub owned_by: Option<String>,
    /// Context length reported by the model listing
    #[serde(default)]
    pub max_model_len: Option<u32>,
}

/// Built-in workflow implementations
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowKind {
    /// Replies with the last input message
    Echo(EchoConfig),
    /// Single generation step backed by an OpenAI-compatible chat model
    ChatModel(ChatModelConfig),
}

/// Configuration for the echo workflow
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EchoConfig {
    /// Text appended to every reply
    #[serde(default)]
    pub suffix: String,
}

/// Configuration for the chat model workflow
#[derive(Debug, Clone, Deserialize)]
pub struct ChatModelConfig {
    /// Base URL of the OpenAI-compatible API, including any `/v1` prefix
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Bearer token sent upstream
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Upstream model name
    pub model: String,
    /// System prompt placed before the user's message
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Sampling temperature used for every upstream call
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Upper bound on generated tokens; the request's value applies when unset
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// Default system prompt for the chat model workflow
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Chat with the user with a friendly tone.";

fn default_base_url() -> Url {
    Url::parse("https://api.openai.com/v1").expect("must be a valid URL")
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_temperature() -> f64 {
    0.05
}
