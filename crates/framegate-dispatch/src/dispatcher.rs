// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classify-gate-dispatch pipeline.

use std::sync::Arc;

use framegate_codec::DecisionCodec;
use framegate_core::{DispatchResult, Frame, RoutingDecision, RoutingOracle};
use framegate_handlers::HandlerRegistry;
use tracing::{debug, info, warn};

/// Orchestrates one frame through classification, the confidence gate, and
/// handler invocation.
///
/// The dispatcher is a total function over frames: oracle failures become
/// rejected decisions, gate declines become `skipped` results, and handler
/// failures become `error` results. Callers never see a transport error.
pub struct Dispatcher {
    oracle: Arc<dyn RoutingOracle>,
    codec: DecisionCodec,
    registry: Arc<HandlerRegistry>,
    confidence_threshold: f64,
}

impl Dispatcher {
    /// Builds a dispatcher over the given oracle and registry.
    ///
    /// The decision codec accepts exactly the labels the registry has
    /// handlers for (plus `none`), so replies naming anything else are
    /// marked malformed at decode time.
    pub fn new(
        oracle: Arc<dyn RoutingOracle>,
        registry: Arc<HandlerRegistry>,
        confidence_threshold: f64,
    ) -> Self {
        let codec = DecisionCodec::new(registry.labels());
        Self {
            oracle,
            codec,
            registry,
            confidence_threshold,
        }
    }

    /// The registry backing this dispatcher. Forced-route entry points use
    /// it to invoke a handler directly, bypassing classification.
    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    /// The configured confidence threshold.
    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Classifies a frame into a routing decision.
    ///
    /// Total: an oracle transport failure yields a rejected decision rather
    /// than an error, keeping the dispatch path failure-free.
    pub async fn classify(&self, frame: &Frame) -> RoutingDecision {
        let prompt = self.codec.encode(frame);
        match self.oracle.classify(&prompt).await {
            Ok(raw) => self.codec.decode(&raw),
            Err(e) => {
                warn!(error = %e, "oracle classification failed");
                RoutingDecision::rejected(format!("oracle failure: {e}"))
            }
        }
    }

    /// Runs the full pipeline for one frame.
    pub async fn dispatch(&self, frame: &Frame) -> DispatchResult {
        let decision = self.classify(frame).await;
        info!(
            route = %decision.route,
            confidence = decision.confidence,
            malformed = decision.malformed,
            "frame classified"
        );

        if decision.malformed {
            debug!("skipping dispatch: decision is malformed");
            return DispatchResult::skipped(decision);
        }

        // Strict less-than: a decision exactly at the threshold passes.
        if decision.confidence < self.confidence_threshold {
            debug!(
                confidence = decision.confidence,
                threshold = self.confidence_threshold,
                "skipping dispatch: confidence below threshold"
            );
            return DispatchResult::skipped(decision);
        }

        let Some(handler) = self.registry.lookup(decision.route) else {
            // `none` lands here by design; any other miss means the
            // registry changed between codec construction and now.
            if decision.route != framegate_core::RoutingLabel::None {
                warn!(route = %decision.route, "no handler registered for route");
            }
            return DispatchResult::skipped(decision);
        };

        match handler.invoke(frame).await {
            Ok(response) => {
                info!(route = %decision.route, "handler invocation succeeded");
                DispatchResult::success(decision, response)
            }
            Err(e) => {
                warn!(route = %decision.route, error = %e, "handler invocation failed");
                let detail = e.to_string();
                DispatchResult::error(decision, detail)
            }
        }
    }
}
