// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the reasoning oracle.
//!
//! Provides [`GeminiOracle`] which handles request construction, inline
//! image attachment, image-reference resolution, and bounded timeouts. The
//! client only transports: every failure surfaces as a typed error so the
//! dispatcher can fold it into a malformed decision and keep the confidence
//! gate uniform.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use framegate_config::model::OracleConfig;
use framegate_core::{FramegateError, OraclePrompt, RoutingOracle, VisualSource};
use tracing::{debug, info};

use crate::types::{
    Blob, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

/// Mime type assumed for image bytes when the source does not say otherwise.
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// HTTP client for a Gemini-style `generateContent` oracle endpoint.
#[derive(Debug, Clone)]
pub struct GeminiOracle {
    client: reqwest::Client,
    fetch_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
    max_output_tokens: u32,
    timeout: Duration,
    fetch_timeout: Duration,
}

impl GeminiOracle {
    /// Creates a new oracle client from configuration.
    ///
    /// Builds two connection pools: one with the oracle call timeout and one
    /// with the shorter image-reference fetch timeout.
    pub fn new(config: &OracleConfig) -> Result<Self, FramegateError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let fetch_timeout = Duration::from_secs(config.fetch_timeout_secs);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FramegateError::Oracle {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let fetch_client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| FramegateError::Oracle {
                message: format!("failed to build fetch client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            fetch_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            timeout,
            fetch_timeout,
        })
    }

    /// Resolves the prompt's visual source to inline bytes.
    ///
    /// Inline bytes pass through; a reference URL is fetched with the
    /// bounded fetch timeout; fetch failure is reported the same way as an
    /// oracle failure.
    async fn resolve_image(
        &self,
        visual: &VisualSource,
    ) -> Result<Option<(String, Vec<u8>)>, FramegateError> {
        match visual {
            VisualSource::Absent => Ok(None),
            VisualSource::Inline(bytes) => Ok(Some((DEFAULT_IMAGE_MIME.to_string(), bytes.clone()))),
            VisualSource::Reference(url) => {
                debug!(url = %url, "fetching image reference");
                let response = self
                    .fetch_client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| self.map_transport_error(e, self.fetch_timeout, "image fetch"))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FramegateError::Oracle {
                        message: format!("image reference fetch returned {status}"),
                        source: None,
                    });
                }

                let mime = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .filter(|v| v.starts_with("image/"))
                    .unwrap_or(DEFAULT_IMAGE_MIME)
                    .to_string();

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| self.map_transport_error(e, self.fetch_timeout, "image fetch"))?;

                Ok(Some((mime, bytes.to_vec())))
            }
        }
    }

    fn map_transport_error(
        &self,
        err: reqwest::Error,
        timeout: Duration,
        what: &str,
    ) -> FramegateError {
        if err.is_timeout() {
            FramegateError::Timeout { duration: timeout }
        } else {
            FramegateError::Oracle {
                message: format!("{what} request failed: {err}"),
                source: Some(Box::new(err)),
            }
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl RoutingOracle for GeminiOracle {
    async fn classify(&self, prompt: &OraclePrompt) -> Result<String, FramegateError> {
        let mut parts = vec![Part::Text {
            text: prompt.text.clone(),
        }];

        if let Some((mime_type, bytes)) = self.resolve_image(&prompt.visual).await? {
            parts.push(Part::InlineData {
                inline_data: Blob {
                    mime_type,
                    data: BASE64.encode(bytes),
                },
            });
        }

        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        info!(model = %self.model, "sending classification request to oracle");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e, self.timeout, "oracle"))?;

        let status = response.status();
        debug!(status = %status, "oracle response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FramegateError::Oracle {
                message: format!("oracle returned {status}: {body}"),
                source: None,
            });
        }

        let body: GenerateContentResponse =
            response.json().await.map_err(|e| FramegateError::Oracle {
                message: format!("failed to parse oracle response: {e}"),
                source: Some(Box::new(e)),
            })?;

        body.text().ok_or_else(|| FramegateError::Oracle {
            message: "oracle response contained no text".to_string(),
            source: None,
        })
    }
}
