//! HTTP server assembly for Flowserve
//!
//! Combines the gateway routes with the health endpoint, request tracing and
//! optional CORS, and serves them until shutdown.

mod cors;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use flowserve_config::Config;
use flowserve_gateway::{GatewayState, WorkflowRegistry};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    streams: CancellationToken,
}

impl Server {
    /// Build the server and its workflow registry from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configured workflow cannot be constructed
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let registry = WorkflowRegistry::from_config(&config.workflows)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Build the server around an already assembled registry
    ///
    /// Only the `[server]` section of `config` is used.
    pub fn with_registry(config: &Config, registry: WorkflowRegistry) -> Self {
        let streams = CancellationToken::new();
        let state = GatewayState::new(Arc::new(registry), streams.clone());

        let mut app = Router::new();

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.merge(flowserve_gateway::gateway_router(state));

        app = app.layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Self {
            router: app,
            listen_address: config.server.listen_address(),
            streams,
        }
    }

    /// Replace the configured listen address
    #[must_use]
    pub fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests on the configured listen address
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.listen_address).await?;
        self.serve_with_listener(listener, shutdown).await
    }

    /// Serve requests accepted by `listener`
    ///
    /// Open streams are ended as soon as `shutdown` fires so graceful
    /// shutdown does not wait on them.
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails
    pub async fn serve_with_listener(self, listener: TcpListener, shutdown: CancellationToken) -> anyhow::Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        let streams = self.streams;

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
                streams.cancel();
            })
            .await?;

        Ok(())
    }
}
