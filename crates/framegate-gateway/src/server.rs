// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use framegate_core::FramegateError;
use framegate_dispatch::Dispatcher;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The dispatch pipeline serving every routing endpoint.
    pub dispatcher: Arc<Dispatcher>,
}

/// Gateway server configuration (mirrors GatewayConfig from framegate-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router with all routes and middleware attached.
///
/// Separated from [`start_server`] so tests can drive the router directly
/// without binding a socket.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route("/analyze", post(handlers::post_analyze))
        .route("/route", post(handlers::post_route))
        .route("/route/upload", post(handlers::post_route_upload))
        .route(
            "/route/face-recognition",
            post(handlers::post_force_face_recognition),
        )
        .route(
            "/route/sign-language",
            post(handlers::post_force_sign_language),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves routes:
/// - GET / and GET /health (service info)
/// - POST /analyze (classify only)
/// - POST /route and POST /route/upload (full pipeline)
/// - POST /route/face-recognition and /route/sign-language (forced routes)
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), FramegateError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FramegateError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| FramegateError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
