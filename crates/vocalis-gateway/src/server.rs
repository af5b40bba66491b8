// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use vocalis_core::VocalisError;

use crate::handlers;
use crate::registry::StrategyRegistry;

/// Shared state for axum request handlers.
pub struct GatewayState<I> {
    pub registry: Arc<StrategyRegistry<I>>,
    /// Process start, for uptime reporting.
    pub started: Instant,
}

impl<I> GatewayState<I> {
    pub fn new(registry: StrategyRegistry<I>) -> Self {
        Self {
            registry: Arc::new(registry),
            started: Instant::now(),
        }
    }
}

impl<I> Clone for GatewayState<I> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            started: self.started,
        }
    }
}

/// Gateway server configuration (mirrors `GatewayConfig` from vocalis-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Build the gateway router.
///
/// - GET /health
/// - POST /v1/auth/{strategy}
pub fn router<I>(state: GatewayState<I>) -> Router
where
    I: Serialize + Send + 'static,
{
    Router::new()
        .route("/health", get(handlers::get_health::<I>))
        .route("/v1/auth/{strategy}", post(handlers::post_authenticate::<I>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured host:port and serve until `shutdown` resolves.
pub async fn start_server<I, F>(
    config: &ServerConfig,
    state: GatewayState<I>,
    shutdown: F,
) -> Result<(), VocalisError>
where
    I: Serialize + Send + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let registry = Arc::clone(&state.registry);
    let app = router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VocalisError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!(strategies = ?registry.names(), "Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| VocalisError::Internal(format!("gateway server error: {e}")))?;

    registry.shutdown().await;
    tracing::info!("Gateway server stopped");
    Ok(())
}
