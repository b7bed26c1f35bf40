use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::registry::WorkflowRegistry;

/// Shared state for gateway route handlers
#[derive(Clone)]
pub struct GatewayState {
    pub(crate) registry: Arc<WorkflowRegistry>,
    pub(crate) shutdown: CancellationToken,
}

impl GatewayState {
    /// Serve `registry`; cancelling `shutdown` ends every open stream
    pub fn new(registry: Arc<WorkflowRegistry>, shutdown: CancellationToken) -> Self {
        Self { registry, shutdown }
    }

    /// Token for one request, cancelled on shutdown or when the request is dropped
    pub(crate) fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
