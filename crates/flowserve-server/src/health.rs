use http::StatusCode;

/// Health check handler, `200` with an empty body
pub async fn health_handler() -> StatusCode {
    StatusCode::OK
}
