// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Framegate dispatcher.

use thiserror::Error;

/// The primary error type used across the Framegate workspace.
///
/// Everything below the ingress boundary converts failures into data on the
/// `DispatchResult`; these variants exist for the seams where a typed failure
/// still crosses a function boundary (oracle client, handler adapters,
/// ingress input validation).
#[derive(Debug, Error)]
pub enum FramegateError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Reasoning oracle errors (unreachable endpoint, non-2xx status,
    /// unusable response framing).
    #[error("oracle error: {message}")]
    Oracle {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Downstream handler errors (unreachable service, non-2xx status,
    /// response the adapter cannot normalize, missing required input).
    #[error("handler error: {message}")]
    Handler {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No handler is registered for the requested routing label.
    #[error("no handler registered for label `{label}`")]
    HandlerNotRegistered { label: String },

    /// Malformed inbound request (undecodable payload, missing field).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An outbound call exceeded its bounded timeout.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
