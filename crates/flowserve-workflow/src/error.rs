use thiserror::Error;

/// Errors raised while running a workflow
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The history cannot be processed by this workflow
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A model or service the workflow calls returned an error
    #[error("upstream error: {0}")]
    Upstream(String),

    /// A workflow step failed
    #[error("{step} failed: {message}")]
    Step {
        /// Step that failed
        step: String,
        /// Failure description
        message: String,
    },

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl WorkflowError {
    /// Failure of a named step
    pub fn step(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Step {
            step: step.into(),
            message: message.into(),
        }
    }
}
