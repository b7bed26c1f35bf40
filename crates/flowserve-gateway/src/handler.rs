//! Axum route handlers for the OpenAI-compatible endpoints

use std::convert::Infallible;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use flowserve_core::{ErrorResponse, HttpError};
use futures_util::{Stream, StreamExt};

use crate::completion::unix_now;
use crate::convert;
use crate::error::GatewayError;
use crate::protocol::openai::ChatCompletionRequest;
use crate::sse;
use crate::state::GatewayState;
use crate::stream::StreamFrame;

/// Build the gateway router with and without the `/v1` prefix
pub fn gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route("/chat/completions", routing::post(chat_completions))
        .route("/v1/chat/completions", routing::post(chat_completions))
        .route("/models", routing::get(list_models))
        .route("/v1/models", routing::get(list_models))
        .with_state(state)
}

/// Handle `POST /chat/completions`
async fn chat_completions(
    State(state): State<GatewayState>,
    payload: Result<Json<ChatCompletionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(rejection.into()),
    };

    if request.messages.is_empty() {
        return error_response(GatewayError::InvalidRequest(
            "messages must contain at least one entry".to_owned(),
        ));
    }

    tracing::debug!(
        model = %request.model,
        messages = request.messages.len(),
        stream = request.stream,
        "chat completion request"
    );

    let workflow_request = convert::workflow_request(&request, state.request_token());

    if request.stream {
        match state.stream(&request.model, workflow_request) {
            Ok(frames) => stream_response(frames).into_response(),
            Err(e) => error_response(e),
        }
    } else {
        match state.complete(&request.model, workflow_request).await {
            Ok(completion) => Json(completion.into_response(request.model)).into_response(),
            Err(e) => error_response(e),
        }
    }
}

/// Handle `GET /models`
async fn list_models(State(state): State<GatewayState>) -> Response {
    Json(state.registry.model_list(unix_now())).into_response()
}

/// Write frames to the client as `text/event-stream`
///
/// No keep-alive comments are interleaved with the frames.
fn stream_response(
    frames: impl Stream<Item = StreamFrame> + Send + 'static,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(frames.map(|frame| Ok(sse::event(&frame))))
}

/// Convert a gateway error to a JSON error response
#[allow(clippy::needless_pass_by_value)]
fn error_response(error: GatewayError) -> Response {
    let status = error.status_code();

    if status.is_server_error() {
        tracing::error!(%status, error = %error, "request failed");
    } else {
        tracing::debug!(%status, error = %error, "request rejected");
    }

    (status, Json(ErrorResponse::from_error(&error))).into_response()
}
