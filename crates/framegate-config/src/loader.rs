// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./framegate.toml` > `~/.config/framegate/framegate.toml`
//! > `/etc/framegate/framegate.toml` with environment variable overrides via
//! the `FRAMEGATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FramegateConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/framegate/framegate.toml` (system-wide)
/// 3. `~/.config/framegate/framegate.toml` (user XDG config)
/// 4. `./framegate.toml` (local directory)
/// 5. `FRAMEGATE_*` environment variables
pub fn load_config() -> Result<FramegateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FramegateConfig::default()))
        .merge(Toml::file("/etc/framegate/framegate.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("framegate/framegate.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("framegate.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<FramegateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FramegateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FramegateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FramegateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `FRAMEGATE_ROUTING_CONFIDENCE_THRESHOLD`
/// must map to `routing.confidence_threshold`, not `routing.confidence.threshold`.
/// Handler sections are matched before the bare `handlers_` prefix because the
/// section names themselves contain underscores.
fn env_provider() -> Env {
    Env::prefixed("FRAMEGATE_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: FRAMEGATE_ORACLE_API_KEY -> "oracle_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("gateway_", "gateway.", 1)
            .replacen("oracle_", "oracle.", 1)
            .replacen("routing_", "routing.", 1)
            .replacen(
                "handlers_face_recognition_",
                "handlers.face_recognition.",
                1,
            )
            .replacen("handlers_sign_language_", "handlers.sign_language.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_file() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.gateway.port, 8001);
        assert_eq!(config.routing.confidence_threshold, 0.7);
        assert_eq!(config.oracle.timeout_secs, 30);
        assert_eq!(config.handlers.face_recognition.timeout_secs, 60);
        assert_eq!(config.handlers.sign_language.timeout_secs, 30);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [routing]
            confidence_threshold = 0.85

            [handlers.sign_language]
            url = "http://sign.local:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.routing.confidence_threshold, 0.85);
        assert_eq!(config.handlers.sign_language.url, "http://sign.local:9000");
        // Untouched sections keep their defaults.
        assert_eq!(config.oracle.model, "gemini-2.0-flash-exp");
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("framegate.toml");
        std::fs::write(&path, "[gateway]\nport = 9999\n").unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.gateway.port, 9999);
    }
}
