// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `framegate serve` command implementation.
//!
//! Wires the configured oracle client and handler adapters into the dispatch
//! pipeline and starts the gateway HTTP server.

use std::sync::Arc;

use framegate_config::FramegateConfig;
use framegate_core::FramegateError;
use framegate_dispatch::Dispatcher;
use framegate_gateway::{GatewayState, ServerConfig, start_server};
use framegate_handlers::{FaceRecognitionHandler, HandlerRegistry, SignLanguageHandler};
use framegate_oracle::GeminiOracle;
use tracing::{info, warn};

/// Builds the handler registry from configuration.
///
/// A handler is registered only when its URL is configured; an empty URL
/// leaves the label unroutable and the corresponding replies malformed.
fn build_registry(config: &FramegateConfig) -> Result<HandlerRegistry, FramegateError> {
    let mut registry = HandlerRegistry::new();

    if config.handlers.face_recognition.url.is_empty() {
        warn!("face recognition handler URL not configured; label disabled");
    } else {
        let handler = FaceRecognitionHandler::new(&config.handlers.face_recognition)?;
        info!(endpoint = %handler.endpoint(), "registered face recognition handler");
        registry.register(Arc::new(handler));
    }

    if config.handlers.sign_language.url.is_empty() {
        warn!("sign language handler URL not configured; label disabled");
    } else {
        let handler = SignLanguageHandler::new(&config.handlers.sign_language)?;
        info!(endpoint = %handler.endpoint(), "registered sign language handler");
        registry.register(Arc::new(handler));
    }

    Ok(registry)
}

/// Runs the `framegate serve` command.
///
/// Initializes tracing, builds the oracle client and handler registry from
/// configuration, and serves the gateway until the process is stopped.
pub async fn run_serve(config: FramegateConfig) -> Result<(), FramegateError> {
    init_tracing(&config.gateway.log_level);

    info!("starting framegate serve");

    if config.oracle.api_key.is_empty() {
        warn!("oracle API key is empty; classification requests will be rejected upstream");
    }

    let oracle = Arc::new(GeminiOracle::new(&config.oracle)?);
    let registry = Arc::new(build_registry(&config)?);
    if registry.is_empty() {
        warn!("no handlers registered; every frame will be skipped");
    }

    let dispatcher = Dispatcher::new(
        oracle,
        registry,
        config.routing.confidence_threshold,
    );

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    let state = GatewayState {
        dispatcher: Arc::new(dispatcher),
    };

    start_server(&server_config, state).await
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("framegate={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
