// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock routing oracle for deterministic testing.
//!
//! `MockOracle` implements `RoutingOracle` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use framegate_core::{FramegateError, OraclePrompt, RoutingOracle};

/// One scripted oracle outcome.
enum Reply {
    Text(String),
    Failure(String),
}

/// A mock routing oracle that returns pre-configured raw replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a default
/// `none` classification is returned. Every call is counted so tests can
/// assert whether classification happened at all.
pub struct MockOracle {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: AtomicUsize,
}

impl MockOracle {
    /// Create a new mock oracle with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock oracle pre-loaded with the given raw replies.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(
                replies.into_iter().map(Reply::Text).collect(),
            )),
            calls: AtomicUsize::new(0),
        }
    }

    /// Convenience constructor for a single well-formed classification.
    pub fn classifying(route: &str, confidence: f64) -> Self {
        Self::with_replies(vec![
            serde_json::json!({
                "route": route,
                "confidence": confidence,
                "reasoning": "scripted classification"
            })
            .to_string(),
        ])
    }

    /// Add a raw reply to the end of the queue.
    pub async fn add_reply(&self, raw: String) {
        self.replies.lock().await.push_back(Reply::Text(raw));
    }

    /// Add a transport failure to the end of the queue.
    pub async fn add_failure(&self, message: &str) {
        self.replies
            .lock()
            .await
            .push_back(Reply::Failure(message.to_string()));
    }

    /// Number of classification calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoutingOracle for MockOracle {
    async fn classify(&self, _prompt: &OraclePrompt) -> Result<String, FramegateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.lock().await.pop_front() {
            Some(Reply::Text(raw)) => Ok(raw),
            Some(Reply::Failure(message)) => Err(FramegateError::Oracle {
                message,
                source: None,
            }),
            None => Ok(serde_json::json!({
                "route": "none",
                "confidence": 0.0,
                "reasoning": "default mock reply"
            })
            .to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use framegate_core::VisualSource;

    use super::*;

    fn prompt() -> OraclePrompt {
        OraclePrompt {
            text: "classify".to_string(),
            visual: VisualSource::Absent,
        }
    }

    #[tokio::test]
    async fn default_reply_when_queue_empty() {
        let oracle = MockOracle::new();
        let raw = oracle.classify(&prompt()).await.unwrap();
        assert!(raw.contains("\"route\":\"none\""));
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn queued_replies_returned_in_order() {
        let oracle = MockOracle::with_replies(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(oracle.classify(&prompt()).await.unwrap(), "first");
        assert_eq!(oracle.classify(&prompt()).await.unwrap(), "second");
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn scripted_failure_is_an_oracle_error() {
        let oracle = MockOracle::new();
        oracle.add_failure("connection refused").await;
        let err = oracle.classify(&prompt()).await.unwrap_err();
        assert!(matches!(err, FramegateError::Oracle { .. }));
    }

    #[tokio::test]
    async fn classifying_builds_a_wellformed_reply() {
        let oracle = MockOracle::classifying("face_recognition", 0.9);
        let raw = oracle.classify(&prompt()).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["route"], "face_recognition");
        assert_eq!(value["confidence"], 0.9);
    }
}
