use std::path::Path;

use crate::{Config, WorkflowKind};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable expansion, TOML parsing or
    /// validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is configured or a workflow entry is
    /// invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workflows.is_empty() {
            anyhow::bail!("at least one workflow must be configured under [workflows]");
        }

        for (model_id, workflow) in &self.workflows {
            if model_id.trim().is_empty() || model_id.chars().any(char::is_whitespace) {
                anyhow::bail!("workflow model id `{model_id}` must be non-empty and contain no whitespace");
            }

            if let WorkflowKind::ChatModel(chat) = &workflow.kind {
                if chat.model.trim().is_empty() {
                    anyhow::bail!("workflow `{model_id}`: `model` must not be empty");
                }

                if !(0.0..=2.0).contains(&chat.temperature) {
                    anyhow::bail!("workflow `{model_id}`: `temperature` must be between 0 and 2");
                }
            }
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }
}
