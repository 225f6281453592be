// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter for the combined face recognition + TTS service.
//!
//! The service accepts `multipart/form-data` on its `/process` endpoint:
//! a required `image` text field (base64), an optional `audio` file part,
//! and an optional `audio_text` field, plus annotation/announcement flags.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use framegate_config::model::HandlerConfig;
use framegate_core::{Frame, FramegateError, HandlerAdapter, HandlerResponse, RoutingLabel, VisualSource};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::{into_flat_object, map_transport_error, normalize_endpoint};

/// Canonical endpoint suffix of the face recognition service.
const PROCESS_SUFFIX: &str = "/process";

/// Adapter for the face recognition + TTS downstream service.
#[derive(Debug, Clone)]
pub struct FaceRecognitionHandler {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl FaceRecognitionHandler {
    /// Creates the adapter from its handler configuration.
    pub fn new(config: &HandlerConfig) -> Result<Self, FramegateError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FramegateError::Handler {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: normalize_endpoint(&config.url, PROCESS_SUFFIX),
            timeout,
        })
    }

    /// The resolved endpoint this adapter posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl HandlerAdapter for FaceRecognitionHandler {
    fn label(&self) -> RoutingLabel {
        RoutingLabel::FaceRecognition
    }

    async fn invoke(&self, frame: &Frame) -> Result<HandlerResponse, FramegateError> {
        // Face recognition cannot proceed without image bytes; fail fast
        // before touching the network.
        let VisualSource::Inline(image) = &frame.visual else {
            return Err(FramegateError::Handler {
                message: "face recognition requires inline image bytes".to_string(),
                source: None,
            });
        };

        let mut form = Form::new()
            .text("image", BASE64.encode(image))
            .text("annotated", "true")
            .text("announce", "true")
            .text("speak", "true");

        if let Some(audio) = &frame.audio {
            let part = Part::bytes(audio.clone())
                .file_name("audio.wav")
                .mime_str("audio/wav")
                .map_err(|e| FramegateError::Handler {
                    message: format!("failed to build audio part: {e}"),
                    source: Some(Box::new(e)),
                })?;
            form = form.part("audio", part);
        }

        if let Some(description) = &frame.audio_description {
            form = form.text("audio_text", description.clone());
        }

        info!(endpoint = %self.endpoint, "calling face recognition service");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FramegateError::Handler {
                message: format!("face recognition service returned {status}: {body}"),
                source: None,
            });
        }

        let value: serde_json::Value =
            response.json().await.map_err(|e| FramegateError::Handler {
                message: format!("failed to parse face recognition response: {e}"),
                source: Some(Box::new(e)),
            })?;
        let result = into_flat_object(value)?;

        if let Some(faces) = result.get("faces").and_then(|v| v.as_array()) {
            debug!(count = faces.len(), "faces detected");
        }

        Ok(result)
    }
}
