use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The server layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// Transport-level error body
///
/// `detail` carries the message for clients that expect the plain
/// `{"detail": ...}` shape; `error` mirrors it in the `OpenAI` error shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure message
    pub detail: String,
    /// Structured error description
    pub error: ErrorDetail,
}

/// Structured error description inside [`ErrorResponse`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Failure message
    pub message: String,
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error code, always null for now
    pub code: Option<String>,
}

impl ErrorResponse {
    /// Build the body for any [`HttpError`]
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        let message = error.client_message();

        Self {
            detail: message.clone(),
            error: ErrorDetail {
                message,
                error_type: error.error_type().to_owned(),
                code: None,
            },
        }
    }
}
