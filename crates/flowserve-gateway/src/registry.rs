//! Mapping from client-facing model ids to workflows
//!
//! The registry is assembled once at startup through [`WorkflowRegistryBuilder`]
//! and is read-only afterwards, so lookups need no locking.

use std::sync::Arc;

use flowserve_config::WorkflowsConfig;
use flowserve_workflow::{Workflow, build_workflow};
use indexmap::IndexMap;

use crate::error::GatewayError;
use crate::protocol::openai::{Model, ModelList, ModelPermission};

/// Owner reported for models that do not configure one
pub const DEFAULT_OWNED_BY: &str = "flowserve";

/// Context length reported for models that do not configure one
pub const DEFAULT_MAX_MODEL_LEN: u32 = 16_000;

/// Descriptive metadata shown in the model listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCard {
    pub owned_by: String,
    pub max_model_len: u32,
}

impl Default for ModelCard {
    fn default() -> Self {
        Self {
            owned_by: DEFAULT_OWNED_BY.to_owned(),
            max_model_len: DEFAULT_MAX_MODEL_LEN,
        }
    }
}

struct Entry {
    workflow: Arc<dyn Workflow>,
    card: ModelCard,
}

/// Immutable set of workflows keyed by model id, in registration order
pub struct WorkflowRegistry {
    entries: IndexMap<String, Entry>,
}

/// Collects workflows before the registry is frozen
#[derive(Default)]
pub struct WorkflowRegistryBuilder {
    entries: IndexMap<String, Entry>,
}

impl WorkflowRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `workflow` under `name` with the default model card
    pub fn register(self, name: impl Into<String>, workflow: Arc<dyn Workflow>) -> Result<Self, GatewayError> {
        self.register_with_card(name, workflow, ModelCard::default())
    }

    /// Register `workflow` under `name`
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::DuplicateModel` if `name` is already taken
    pub fn register_with_card(
        mut self,
        name: impl Into<String>,
        workflow: Arc<dyn Workflow>,
        card: ModelCard,
    ) -> Result<Self, GatewayError> {
        let name = name.into();

        if self.entries.contains_key(&name) {
            return Err(GatewayError::DuplicateModel { model: name });
        }

        tracing::debug!(model = %name, kind = workflow.kind(), "workflow registered");
        self.entries.insert(name, Entry { workflow, card });

        Ok(self)
    }

    /// Freeze the registry
    pub fn build(self) -> WorkflowRegistry {
        WorkflowRegistry { entries: self.entries }
    }
}

impl WorkflowRegistry {
    pub fn builder() -> WorkflowRegistryBuilder {
        WorkflowRegistryBuilder::new()
    }

    /// Build every workflow declared in the configuration, in file order
    ///
    /// # Errors
    ///
    /// Returns an error if a workflow cannot be constructed
    pub fn from_config(config: &WorkflowsConfig) -> Result<Self, GatewayError> {
        let mut builder = Self::builder();

        for (name, workflow_config) in config {
            let workflow = build_workflow(workflow_config)?;
            let card = ModelCard {
                owned_by: workflow_config
                    .owned_by
                    .clone()
                    .unwrap_or_else(|| DEFAULT_OWNED_BY.to_owned()),
                max_model_len: workflow_config.max_model_len.unwrap_or(DEFAULT_MAX_MODEL_LEN),
            };

            builder = builder.register_with_card(name.clone(), workflow, card)?;
        }

        let registry = builder.build();
        tracing::info!(models = registry.len(), "workflow registry built");

        Ok(registry)
    }

    /// Look up the workflow serving `model`
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::ModelNotFound` if no workflow is registered
    /// under that name
    pub fn resolve(&self, model: &str) -> Result<Arc<dyn Workflow>, GatewayError> {
        self.entries
            .get(model)
            .map(|entry| Arc::clone(&entry.workflow))
            .ok_or_else(|| GatewayError::ModelNotFound { model: model.to_owned() })
    }

    /// Registered model ids in registration order
    pub fn enumerate(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Model listing for every registered workflow
    pub fn model_list(&self, created: u64) -> ModelList {
        let data = self
            .entries
            .iter()
            .map(|(name, entry)| Model {
                id: name.clone(),
                object: "model".to_owned(),
                created,
                owned_by: entry.card.owned_by.clone(),
                root: name.clone(),
                parent: None,
                max_model_len: entry.card.max_model_len,
                permission: vec![ModelPermission::standard(created)],
            })
            .collect();

        ModelList {
            object: "list".to_owned(),
            data,
        }
    }
}
