// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles service info, classify-only, full dispatch (JSON and multipart),
//! and forced-route endpoints.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use framegate_core::{Frame, FramegateError, RoutingLabel};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::server::GatewayState;

/// Request body for the JSON routing endpoints.
///
/// All fields are optional; an empty body is a valid (empty) frame.
#[derive(Debug, Default, Deserialize)]
pub struct FrameRequest {
    /// Base64-encoded image bytes.
    #[serde(default)]
    pub image_base64: Option<String>,
    /// URL of an image for the oracle client to fetch.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Base64-encoded audio bytes.
    #[serde(default)]
    pub audio_base64: Option<String>,
    /// Description or transcription of the audio input.
    #[serde(default)]
    pub audio_description: Option<String>,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Service name.
    pub service: String,
    /// Binary version.
    pub version: String,
    /// Health status string.
    pub status: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Labels with a registered handler.
    pub registered_handlers: Vec<String>,
    /// Configured confidence threshold.
    pub confidence_threshold: f64,
}

/// Response body for a successful forced-route invocation.
#[derive(Debug, Serialize)]
pub struct ForcedRouteResponse {
    /// Normalized handler response.
    pub api_response: framegate_core::HandlerResponse,
    /// Always "success".
    pub status: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Builds a frame from a JSON frame request.
///
/// Undecodable base64 is the producer's fault and maps to a 400, not a
/// malformed routing decision.
fn frame_from_request(body: &FrameRequest) -> Result<Frame, FramegateError> {
    let mut frame = Frame::empty();

    if let Some(encoded) = &body.image_base64 {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| FramegateError::InvalidInput(format!("invalid image_base64: {e}")))?;
        frame = frame.with_image(bytes);
    } else if let Some(url) = &body.image_url {
        frame = frame.with_image_reference(url.clone());
    }

    if let Some(encoded) = &body.audio_base64 {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| FramegateError::InvalidInput(format!("invalid audio_base64: {e}")))?;
        frame = frame.with_audio(bytes);
    }

    if let Some(description) = &body.audio_description {
        frame = frame.with_audio_description(description.clone());
    }

    Ok(frame)
}

/// GET /
pub async fn get_root() -> Json<RootResponse> {
    Json(RootResponse {
        service: "framegate".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "ok".to_string(),
    })
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let registered_handlers = state
        .dispatcher
        .registry()
        .labels()
        .iter()
        .map(|label| label.to_string())
        .collect();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        registered_handlers,
        confidence_threshold: state.dispatcher.confidence_threshold(),
    })
}

/// POST /analyze
///
/// Classify only: returns the routing decision without invoking a handler.
pub async fn post_analyze(
    State(state): State<GatewayState>,
    Json(body): Json<FrameRequest>,
) -> Response {
    let frame = match frame_from_request(&body) {
        Ok(frame) => frame,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let decision = state.dispatcher.classify(&frame).await;
    Json(decision).into_response()
}

/// POST /route
///
/// Full pipeline: classify, gate, dispatch. Always returns 200 with a
/// dispatch result; only malformed producer input is an HTTP error.
pub async fn post_route(
    State(state): State<GatewayState>,
    Json(body): Json<FrameRequest>,
) -> Response {
    let frame = match frame_from_request(&body) {
        Ok(frame) => frame,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let result = state.dispatcher.dispatch(&frame).await;
    Json(result).into_response()
}

/// POST /route/upload
///
/// Full pipeline over multipart form data: an `image` file part, an optional
/// `audio` file part, and an optional `audio_text` (or `audio_description`)
/// field.
pub async fn post_route_upload(
    State(state): State<GatewayState>,
    mut multipart: Multipart,
) -> Response {
    let mut frame = Frame::empty();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("invalid multipart body: {e}"),
                );
            }
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => match field.bytes().await {
                Ok(bytes) => frame = frame.with_image(bytes.to_vec()),
                Err(e) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        format!("failed to read image part: {e}"),
                    );
                }
            },
            "audio" => match field.bytes().await {
                Ok(bytes) => frame = frame.with_audio(bytes.to_vec()),
                Err(e) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        format!("failed to read audio part: {e}"),
                    );
                }
            },
            "audio_text" | "audio_description" => match field.text().await {
                Ok(text) => frame = frame.with_audio_description(text),
                Err(e) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        format!("failed to read audio_text field: {e}"),
                    );
                }
            },
            other => {
                debug!(field = %other, "ignoring unknown multipart field");
            }
        }
    }

    let result = state.dispatcher.dispatch(&frame).await;
    Json(result).into_response()
}

/// POST /route/face-recognition
pub async fn post_force_face_recognition(
    State(state): State<GatewayState>,
    Json(body): Json<FrameRequest>,
) -> Response {
    force_route(state, RoutingLabel::FaceRecognition, body).await
}

/// POST /route/sign-language
pub async fn post_force_sign_language(
    State(state): State<GatewayState>,
    Json(body): Json<FrameRequest>,
) -> Response {
    force_route(state, RoutingLabel::SignLanguage, body).await
}

/// Invokes a handler directly, bypassing classification and the gate.
async fn force_route(state: GatewayState, label: RoutingLabel, body: FrameRequest) -> Response {
    let frame = match frame_from_request(&body) {
        Ok(frame) => frame,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let Some(handler) = state.dispatcher.registry().lookup(label) else {
        let err = FramegateError::HandlerNotRegistered {
            label: label.to_string(),
        };
        return error_response(StatusCode::NOT_FOUND, err.to_string());
    };

    match handler.invoke(&frame).await {
        Ok(response) => Json(ForcedRouteResponse {
            api_response: response,
            status: "success".to_string(),
        })
        .into_response(),
        Err(e) => {
            warn!(route = %label, error = %e, "forced route invocation failed");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}
