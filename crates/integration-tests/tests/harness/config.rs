//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use flowserve_config::{
    ChatModelConfig, Config, CorsConfig, DEFAULT_SYSTEM_PROMPT, EchoConfig, ServerConfig, WorkflowConfig, WorkflowKind,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults and no workflows
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    fn with_workflow(mut self, name: &str, kind: WorkflowKind) -> Self {
        self.config.workflows.insert(
            name.to_owned(),
            WorkflowConfig {
                kind,
                owned_by: None,
                max_model_len: None,
            },
        );
        self
    }

    /// Add an echo workflow that appends `suffix` to the last message
    pub fn with_echo(self, name: &str, suffix: &str) -> Self {
        self.with_workflow(
            name,
            WorkflowKind::Echo(EchoConfig {
                suffix: suffix.to_owned(),
            }),
        )
    }

    /// Add a chat model workflow pointed at a mock upstream
    pub fn with_chat_model(self, name: &str, base_url: &str) -> Self {
        self.with_workflow(
            name,
            WorkflowKind::ChatModel(ChatModelConfig {
                base_url: base_url.parse().expect("valid URL"),
                api_key: Some(SecretString::from("test-key")),
                model: "mock-model".to_owned(),
                system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
                temperature: 0.05,
                max_tokens: None,
            }),
        )
    }

    /// Set the card metadata of an already added workflow
    pub fn with_card(mut self, name: &str, owned_by: &str, max_model_len: u32) -> Self {
        if let Some(workflow) = self.config.workflows.get_mut(name) {
            workflow.owned_by = Some(owned_by.to_owned());
            workflow.max_model_len = Some(max_model_len);
        }
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Serve the health check on another path
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
