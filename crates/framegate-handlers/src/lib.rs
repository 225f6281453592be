// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handler registry and downstream service adapters.
//!
//! Each adapter implements [`framegate_core::HandlerAdapter`]: it shapes a
//! service-specific request from a frame and normalizes the service's
//! response into a flat field-to-value mapping. The registry maps routing
//! labels to adapters and is immutable after startup.

use framegate_core::{FramegateError, HandlerResponse};

pub mod face;
pub mod registry;
pub mod sign;

pub use face::FaceRecognitionHandler;
pub use registry::HandlerRegistry;
pub use sign::SignLanguageHandler;

/// Normalize a configured base URL onto an adapter's canonical endpoint
/// suffix.
///
/// Operators may configure either the bare host (`http://host:5000`) or the
/// full endpoint (`http://host:5000/process`); both resolve to the same
/// address.
pub(crate) fn normalize_endpoint(base: &str, suffix: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(suffix) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{suffix}")
    }
}

/// Normalize a handler response body into the flat mapping contract.
pub(crate) fn into_flat_object(value: serde_json::Value) -> Result<HandlerResponse, FramegateError> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(FramegateError::Handler {
            message: format!("handler returned a non-object response: {other}"),
            source: None,
        }),
    }
}

/// Map a reqwest transport failure into the handler error taxonomy.
pub(crate) fn map_transport_error(
    err: reqwest::Error,
    timeout: std::time::Duration,
) -> FramegateError {
    if err.is_timeout() {
        FramegateError::Timeout { duration: timeout }
    } else {
        FramegateError::Handler {
            message: format!("handler request failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}
