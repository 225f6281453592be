// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Framegate dispatcher.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. The whole tree is built once at process start and
//! passed by value into the component constructors; nothing reads ambient
//! configuration during request handling.

use serde::{Deserialize, Serialize};

/// Top-level Framegate configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FramegateConfig {
    /// Ingress HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Reasoning oracle endpoint settings.
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Confidence gate settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Downstream handler endpoint settings.
    #[serde(default)]
    pub handlers: HandlersConfig,
}

/// Ingress HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Reasoning oracle endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OracleConfig {
    /// API key sent with each oracle request.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier appended to the generate-content path.
    #[serde(default = "default_oracle_model")]
    pub model: String,

    /// Base URL of the oracle API.
    #[serde(default = "default_oracle_base_url")]
    pub base_url: String,

    /// Bounded timeout for the oracle call, in seconds.
    #[serde(default = "default_oracle_timeout_secs")]
    pub timeout_secs: u64,

    /// Bounded timeout for resolving an image reference URL, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Sampling temperature for the routing judgment.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Cap on oracle output tokens.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_oracle_model(),
            base_url: default_oracle_base_url(),
            timeout_secs: default_oracle_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_oracle_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_oracle_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_oracle_timeout_secs() -> u64 {
    30
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_temperature() -> f64 {
    0.3
}

fn default_max_output_tokens() -> u32 {
    500
}

/// Confidence gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Decisions below this confidence are skipped. Comparison is strict
    /// `<`: a confidence exactly equal to the threshold passes the gate.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

fn default_confidence_threshold() -> f64 {
    0.7
}

/// Downstream handler endpoints, one section per routing label.
///
/// A handler with an empty URL is treated as unregistered: the label is not
/// part of the deployment's accepted set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HandlersConfig {
    /// Combined face recognition + TTS service.
    #[serde(default = "default_face_handler")]
    pub face_recognition: HandlerConfig,

    /// Sign language detection service.
    #[serde(default = "default_sign_handler")]
    pub sign_language: HandlerConfig,
}

impl Default for HandlersConfig {
    fn default() -> Self {
        Self {
            face_recognition: default_face_handler(),
            sign_language: default_sign_handler(),
        }
    }
}

/// One handler's endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerConfig {
    /// Base URL or full endpoint of the service. Adapters normalize a bare
    /// base URL onto their canonical path suffix.
    #[serde(default)]
    pub url: String,

    /// Bounded timeout for handler invocations, in seconds.
    #[serde(default = "default_handler_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_face_handler() -> HandlerConfig {
    HandlerConfig {
        url: String::new(),
        // Face recognition + speech synthesis is the slowest downstream hop.
        timeout_secs: 60,
    }
}

fn default_sign_handler() -> HandlerConfig {
    HandlerConfig {
        url: String::new(),
        timeout_secs: 30,
    }
}

fn default_handler_timeout_secs() -> u64 {
    30
}
