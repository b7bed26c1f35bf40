use axum::extract::rejection::JsonRejection;
use flowserve_core::HttpError;
use flowserve_workflow::WorkflowError;
use http::StatusCode;
use thiserror::Error;

/// Errors that can occur while serving a chat completion
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Requested model is not registered
    #[error("model not found: {model}")]
    ModelNotFound { model: String },

    /// A model id was registered twice
    #[error("model registered more than once: {model}")]
    DuplicateModel { model: String },

    /// Body parsed but violates the request contract
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Body could not be parsed as a chat completion request
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// The workflow failed to produce a reply
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl HttpError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ModelNotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MalformedBody(rejection) => rejection.status(),
            Self::DuplicateModel { .. } | Self::Workflow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::ModelNotFound { .. } => "not_found_error",
            Self::InvalidRequest(_) | Self::MalformedBody(_) => "invalid_request_error",
            Self::DuplicateModel { .. } | Self::Workflow(_) => "server_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::MalformedBody(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}
