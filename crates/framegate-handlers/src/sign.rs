// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter for the sign language detection service.
//!
//! The service accepts a JSON body `{"image_base64": ...}` on its
//! `/predict/base64` endpoint and returns a prediction object with keys such
//! as `predicted_sign`, `confidence`, and `hand_detected`.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use framegate_config::model::HandlerConfig;
use framegate_core::{Frame, FramegateError, HandlerAdapter, HandlerResponse, RoutingLabel, VisualSource};
use tracing::{debug, info};

use crate::{into_flat_object, map_transport_error, normalize_endpoint};

/// Canonical endpoint suffix of the sign language service.
const PREDICT_SUFFIX: &str = "/predict/base64";

/// Adapter for the sign language detection downstream service.
#[derive(Debug, Clone)]
pub struct SignLanguageHandler {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl SignLanguageHandler {
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
            endpoint: normalize_endpoint(&config.url, PREDICT_SUFFIX),
            timeout,
        })
    }

    /// The resolved endpoint this adapter posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl HandlerAdapter for SignLanguageHandler {
    fn label(&self) -> RoutingLabel {
        RoutingLabel::SignLanguage
    }

    async fn invoke(&self, frame: &Frame) -> Result<HandlerResponse, FramegateError> {
        let VisualSource::Inline(image) = &frame.visual else {
            return Err(FramegateError::Handler {
                message: "sign language detection requires inline image bytes".to_string(),
                source: None,
            });
        };

        info!(endpoint = %self.endpoint, "calling sign language service");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "image_base64": BASE64.encode(image) }))
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FramegateError::Handler {
                message: format!("sign language service returned {status}: {body}"),
                source: None,
            });
        }

        let value: serde_json::Value =
            response.json().await.map_err(|e| FramegateError::Handler {
                message: format!("failed to parse sign language response: {e}"),
                source: Some(Box::new(e)),
            })?;
        let result = into_flat_object(value)?;

        match (
            result.get("hand_detected").and_then(|v| v.as_bool()),
            result.get("predicted_sign").and_then(|v| v.as_str()),
        ) {
            (Some(true), Some(sign)) => debug!(sign = %sign, "sign detected"),
            (Some(false), _) => debug!("no hand detected in frame"),
            _ => {}
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn handler_for(url: &str) -> SignLanguageHandler {
        SignLanguageHandler::new(&HandlerConfig {
            url: url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn base_url_is_normalized_onto_predict_base64() {
        let handler = handler_for("http://sign.local:9000");
        assert_eq!(handler.endpoint(), "http://sign.local:9000/predict/base64");

        let handler = handler_for("http://sign.local:9000/predict/base64");
        assert_eq!(handler.endpoint(), "http://sign.local:9000/predict/base64");
    }

    #[tokio::test]
    async fn invoke_posts_image_base64_and_flattens_response() {
        let server = MockServer::start().await;
        let image = vec![0xFFu8, 0xD8, 0xFF, 0xE0];
        Mock::given(method("POST"))
            .and(path("/predict/base64"))
            .and(body_json(
                serde_json::json!({ "image_base64": BASE64.encode(&image) }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "predicted_sign": "hello",
                "confidence": 0.95,
                "hand_detected": true,
                "message": "ok"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let handler = handler_for(&server.uri());
        let result = handler
            .invoke(&Frame::empty().with_image(image))
            .await
            .unwrap();
        assert_eq!(result["predicted_sign"], serde_json::json!("hello"));
        assert_eq!(result["hand_detected"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn missing_image_fails_fast() {
        let server = MockServer::start().await;
        let handler = handler_for(&server.uri());

        let err = handler.invoke(&Frame::empty()).await.unwrap_err();
        assert!(err.to_string().contains("requires inline image"), "got: {err}");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn connection_failure_is_a_handler_error() {
        // Unroutable port: nothing is listening.
        let handler = handler_for("http://127.0.0.1:9");
        let err = handler
            .invoke(&Frame::empty().with_image(vec![1]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FramegateError::Handler { .. } | FramegateError::Timeout { .. }
        ));
    }

    #[tokio::test]
    async fn non_object_response_is_a_handler_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict/base64"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"just a string\""))
            .mount(&server)
            .await;

        let handler = handler_for(&server.uri());
        let err = handler
            .invoke(&Frame::empty().with_image(vec![1]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("non-object"), "got: {err}");
    }
}
