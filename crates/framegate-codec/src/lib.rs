// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decision codec for the Framegate dispatcher.
//!
//! Serializes a frame into an oracle prompt and deserializes the oracle's
//! free-text reply into a validated [`RoutingDecision`]. The decode side is
//! the single place where untrusted external text becomes a trusted internal
//! value: it never fails, it always returns a decision, with `malformed` as
//! an explicit tag instead of an error path.

use std::collections::BTreeSet;

use framegate_core::{Frame, OraclePrompt, RoutingDecision, RoutingLabel};

mod decode;
mod prompt;

/// Encodes frames into oracle prompts and decodes oracle replies into
/// validated routing decisions.
///
/// Constructed with the set of labels the deployment accepts (the labels a
/// handler is registered for); `none` is always accepted. A reply naming any
/// other label is marked malformed rather than silently coerced, so
/// misrouted decisions stay observable.
#[derive(Debug, Clone)]
pub struct DecisionCodec {
    allowed: BTreeSet<RoutingLabel>,
}

impl DecisionCodec {
    /// Creates a codec accepting the given labels plus `none`.
    pub fn new(labels: impl IntoIterator<Item = RoutingLabel>) -> Self {
        let mut allowed: BTreeSet<RoutingLabel> = labels.into_iter().collect();
        allowed.insert(RoutingLabel::None);
        Self { allowed }
    }

    /// Builds the oracle prompt for a frame: fixed routing instructions plus
    /// a short context sentence carrying the audio description, with the
    /// frame's visual source attached for the oracle client to inline.
    pub fn encode(&self, frame: &Frame) -> OraclePrompt {
        prompt::compose(frame)
    }

    /// Interprets the oracle's raw reply as a routing decision.
    ///
    /// Total function: every failure mode yields a `malformed` decision with
    /// a diagnostic in `reasoning`; a parse fault is never propagated.
    pub fn decode(&self, raw: &str) -> RoutingDecision {
        decode::decode(&self.allowed, raw)
    }

    /// The labels this codec accepts (including `none`).
    pub fn allowed_labels(&self) -> &BTreeSet<RoutingLabel> {
        &self.allowed
    }
}
