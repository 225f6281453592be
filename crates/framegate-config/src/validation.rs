// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: threshold range, endpoint URL shape, and non-zero timeouts.

use crate::diagnostic::ConfigError;
use crate::model::FramegateConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FramegateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate bind host is not empty
    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    // Validate the confidence threshold is a probability
    let threshold = config.routing.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) || !threshold.is_finite() {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.confidence_threshold must be within [0.0, 1.0], got {threshold}"
            ),
        });
    }

    // Validate oracle settings
    if config.oracle.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "oracle.base_url must not be empty".to_string(),
        });
    } else if !is_http_url(&config.oracle.base_url) {
        errors.push(ConfigError::Validation {
            message: format!(
                "oracle.base_url `{}` must start with http:// or https://",
                config.oracle.base_url
            ),
        });
    }

    if config.oracle.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "oracle.model must not be empty".to_string(),
        });
    }

    if config.oracle.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "oracle.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.oracle.fetch_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "oracle.fetch_timeout_secs must be at least 1".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.oracle.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "oracle.temperature must be within [0.0, 2.0], got {}",
                config.oracle.temperature
            ),
        });
    }

    // Validate handler endpoints. An empty URL means "not registered", which
    // is allowed; a non-empty URL must be well formed.
    for (section, handler) in [
        ("handlers.face_recognition", &config.handlers.face_recognition),
        ("handlers.sign_language", &config.handlers.sign_language),
    ] {
        if !handler.url.trim().is_empty() && !is_http_url(&handler.url) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "{section}.url `{}` must start with http:// or https://",
                    handler.url
                ),
            });
        }
        if handler.timeout_secs == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{section}.timeout_secs must be at least 1"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FramegateConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let mut config = FramegateConfig::default();
        config.routing.confidence_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e
            .to_string()
            .contains("confidence_threshold")));
    }

    #[test]
    fn bad_handler_url_is_rejected() {
        let mut config = FramegateConfig::default();
        config.handlers.sign_language.url = "sign.local:9000".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e
            .to_string()
            .contains("handlers.sign_language.url")));
    }

    #[test]
    fn empty_handler_url_is_allowed() {
        let config = FramegateConfig::default();
        assert!(config.handlers.face_recognition.url.is_empty());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = FramegateConfig::default();
        config.oracle.timeout_secs = 0;
        config.handlers.face_recognition.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = FramegateConfig::default();
        config.gateway.host = " ".to_string();
        config.routing.confidence_threshold = -0.1;
        config.oracle.model = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
