// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Framegate workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A flat mapping of field name to value, as returned by every handler
/// adapter after response normalization.
pub type HandlerResponse = serde_json::Map<String, serde_json::Value>;

/// The visual component of a frame: what image data, if any, is present.
///
/// Modeled as a closed union rather than a pair of nullable fields so that
/// downstream code pattern-matches on the input shape instead of checking
/// nullability ad hoc.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VisualSource {
    /// Raw image bytes supplied inline by the producer.
    Inline(Vec<u8>),
    /// A URL the oracle client resolves to image bytes before classifying.
    Reference(String),
    /// No visual input.
    #[default]
    Absent,
}

impl VisualSource {
    /// Returns true when no visual input is present.
    pub fn is_absent(&self) -> bool {
        matches!(self, VisualSource::Absent)
    }
}

/// One unit of classification input: an optional image (inline or by
/// reference), optional audio bytes, and an optional audio description.
///
/// Constructed once by the ingress adapter, immutable thereafter, and owned
/// exclusively by one request's handling path. An entirely empty frame is
/// valid input -- the pipeline still produces a decision for it (typically a
/// low-confidence `none`).
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Image payload, if any.
    pub visual: VisualSource,
    /// Raw audio bytes, if any.
    pub audio: Option<Vec<u8>>,
    /// Description or transcription of the audio input, if any.
    pub audio_description: Option<String>,
}

impl Frame {
    /// Creates an empty frame with no inputs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets inline image bytes.
    pub fn with_image(mut self, bytes: Vec<u8>) -> Self {
        self.visual = VisualSource::Inline(bytes);
        self
    }

    /// Sets an image reference URL.
    pub fn with_image_reference(mut self, url: impl Into<String>) -> Self {
        self.visual = VisualSource::Reference(url.into());
        self
    }

    /// Sets raw audio bytes.
    pub fn with_audio(mut self, bytes: Vec<u8>) -> Self {
        self.audio = Some(bytes);
        self
    }

    /// Sets the audio description text.
    pub fn with_audio_description(mut self, text: impl Into<String>) -> Self {
        self.audio_description = Some(text.into());
        self
    }
}

/// The closed set of routing destinations, plus the `none` sentinel.
///
/// Wire strings are snake_case (`face_recognition`, `sign_language`, `none`).
/// Which labels a deployment actually accepts is determined by the handlers
/// registered at startup; the decoder rejects labels outside that set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoutingLabel {
    /// Combined face recognition + TTS specialist service.
    FaceRecognition,
    /// Sign language gesture detection service.
    SignLanguage,
    /// Nothing to dispatch to.
    None,
}

/// A validated routing decision produced once per frame.
///
/// `malformed` is serialized as `error` on the wire, matching the contract
/// the frame producer consumes. Created by the decision codec (or
/// synthesized by the dispatcher on oracle failure), immutable, and consumed
/// exactly once by the confidence gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Where the frame should be dispatched.
    pub route: RoutingLabel,
    /// Oracle confidence, validated into [0.0, 1.0].
    pub confidence: f64,
    /// Free-text justification from the oracle (may be empty), or a
    /// diagnostic when the decision is malformed.
    pub reasoning: String,
    /// True when the oracle's reply could not be parsed into the schema.
    #[serde(rename = "error")]
    pub malformed: bool,
}

impl RoutingDecision {
    /// Builds the decision used whenever the oracle's reply (or the oracle
    /// call itself) could not produce a valid decision: label forced to
    /// `none`, confidence to zero, with a diagnostic in `reasoning`.
    pub fn rejected(reasoning: impl Into<String>) -> Self {
        Self {
            route: RoutingLabel::None,
            confidence: 0.0,
            reasoning: reasoning.into(),
            malformed: true,
        }
    }
}

/// Terminal outcome of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    /// A handler was invoked and returned without transport failure.
    Success,
    /// The gate declined to act (malformed decision, low confidence, or
    /// unregistered label). Not an error.
    Skipped,
    /// A handler was invoked and failed; detail is attached.
    Error,
}

/// The externally visible outcome of dispatching one frame.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    /// The decision that drove (or declined) the dispatch.
    pub routing_decision: RoutingDecision,
    /// Normalized handler response; present only on success.
    pub api_response: Option<HandlerResponse>,
    /// Terminal status.
    pub status: DispatchStatus,
    /// Error detail; present only when `status == Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    /// A gate skip: no handler invoked, response absent.
    pub fn skipped(decision: RoutingDecision) -> Self {
        Self {
            routing_decision: decision,
            api_response: None,
            status: DispatchStatus::Skipped,
            error: None,
        }
    }

    /// A successful handler invocation.
    pub fn success(decision: RoutingDecision, response: HandlerResponse) -> Self {
        Self {
            routing_decision: decision,
            api_response: Some(response),
            status: DispatchStatus::Success,
            error: None,
        }
    }

    /// A failed handler invocation; the decision is still returned so the
    /// caller knows what was attempted.
    pub fn error(decision: RoutingDecision, detail: impl Into<String>) -> Self {
        Self {
            routing_decision: decision,
            api_response: None,
            status: DispatchStatus::Error,
            error: Some(detail.into()),
        }
    }
}

/// The composed prompt the oracle client sends out: instruction text plus
/// the frame's visual source, which the client resolves to inline bytes.
#[derive(Debug, Clone)]
pub struct OraclePrompt {
    /// Full instruction + context text.
    pub text: String,
    /// Visual input to attach, if any.
    pub visual: VisualSource,
}
