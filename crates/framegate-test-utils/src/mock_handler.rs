// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock handler adapter with scripted results and invocation capture.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use framegate_core::{Frame, FramegateError, HandlerAdapter, HandlerResponse, RoutingLabel};

/// A mock handler that answers with a fixed response or a scripted failure.
///
/// Invocations are counted and the last frame is captured so tests can
/// assert what the dispatcher actually forwarded.
pub struct MockHandler {
    label: RoutingLabel,
    response: Result<HandlerResponse, String>,
    invocations: AtomicUsize,
    last_frame: Arc<Mutex<Option<Frame>>>,
}

impl MockHandler {
    /// A handler that succeeds with the given JSON object body.
    pub fn succeeding(label: RoutingLabel, body: serde_json::Value) -> Self {
        let response = match body {
            serde_json::Value::Object(map) => Ok(map),
            other => Ok(serde_json::Map::from_iter([(
                "result".to_string(),
                other,
            )])),
        };
        Self {
            label,
            response,
            invocations: AtomicUsize::new(0),
            last_frame: Arc::new(Mutex::new(None)),
        }
    }

    /// A handler that fails every invocation with the given message.
    pub fn failing(label: RoutingLabel, message: &str) -> Self {
        Self {
            label,
            response: Err(message.to_string()),
            invocations: AtomicUsize::new(0),
            last_frame: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of times the handler was invoked.
    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// The frame from the most recent invocation, if any.
    pub async fn last_frame(&self) -> Option<Frame> {
        self.last_frame.lock().await.clone()
    }
}

#[async_trait]
impl HandlerAdapter for MockHandler {
    fn label(&self) -> RoutingLabel {
        self.label
    }

    async fn invoke(&self, frame: &Frame) -> Result<HandlerResponse, FramegateError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        *self.last_frame.lock().await = Some(frame.clone());
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(message) => Err(FramegateError::Handler {
                message: message.clone(),
                source: None,
            }),
        }
    }
}
