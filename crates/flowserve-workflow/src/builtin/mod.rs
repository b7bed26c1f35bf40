//! Workflows that can be declared in the configuration file

pub mod chat_model;
pub mod echo;

use std::sync::Arc;

use flowserve_config::{WorkflowConfig, WorkflowKind};

use crate::error::WorkflowError;
use crate::workflow::Workflow;

pub use chat_model::ChatModelWorkflow;
pub use echo::EchoWorkflow;

/// Construct the workflow described by a configuration entry
pub fn build_workflow(config: &WorkflowConfig) -> Result<Arc<dyn Workflow>, WorkflowError> {
    let workflow: Arc<dyn Workflow> = match &config.kind {
        WorkflowKind::Echo(echo) => Arc::new(EchoWorkflow::new(echo.suffix.clone())),
        WorkflowKind::ChatModel(chat) => Arc::new(ChatModelWorkflow::new(chat)?),
    };

    Ok(workflow)
}
