// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Framegate configuration system.

use framegate_config::diagnostic::ConfigError;
use framegate_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_framegate_config() {
    let toml = r#"
[gateway]
host = "127.0.0.1"
port = 8080
log_level = "debug"

[oracle]
api_key = "test-key-123"
model = "gemini-2.0-flash-exp"
timeout_secs = 20
temperature = 0.5

[routing]
confidence_threshold = 0.8

[handlers.face_recognition]
url = "http://face.local:5000"
timeout_secs = 45

[handlers.sign_language]
url = "http://sign.local:9000/predict/base64"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.log_level, "debug");
    assert_eq!(config.oracle.api_key, "test-key-123");
    assert_eq!(config.oracle.timeout_secs, 20);
    assert_eq!(config.oracle.temperature, 0.5);
    assert_eq!(config.routing.confidence_threshold, 0.8);
    assert_eq!(config.handlers.face_recognition.url, "http://face.local:5000");
    assert_eq!(config.handlers.face_recognition.timeout_secs, 45);
    assert_eq!(
        config.handlers.sign_language.url,
        "http://sign.local:9000/predict/base64"
    );
    // Defaulted where not set.
    assert_eq!(config.handlers.sign_language.timeout_secs, 30);
}

/// Unknown field in [routing] produces an UnknownField error.
#[test]
fn unknown_field_produces_error() {
    let toml = r#"
[routing]
confidense_threshold = 0.8
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("confidense_threshold"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// load_and_validate_str converts a typo into an UnknownKey diagnostic with
/// a suggestion.
#[test]
fn typo_gets_suggestion_diagnostic() {
    let errors = load_and_validate_str(
        r#"
[routing]
confidense_threshold = 0.8
"#,
    )
    .expect_err("typo should fail");

    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "confidense_threshold"
                    && suggestion.as_deref() == Some("confidence_threshold")
        )
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// load_and_validate_str runs semantic validation after deserialization.
#[test]
fn semantic_validation_runs_after_parse() {
    let errors = load_and_validate_str(
        r#"
[routing]
confidence_threshold = 2.0
"#,
    )
    .expect_err("out-of-range threshold should fail validation");

    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::Validation { message } if message.contains("confidence_threshold")
    )));
}

/// Empty input yields the compiled defaults and passes validation.
#[test]
fn empty_config_is_valid() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.gateway.port, 8001);
    assert_eq!(config.routing.confidence_threshold, 0.7);
    assert!(config.handlers.face_recognition.url.is_empty());
}

/// Every key carries a default, so bare section headers fill in from the
/// compiled defaults rather than producing missing-key errors.
#[test]
fn bare_section_headers_fill_from_defaults() {
    let config = load_and_validate_str(
        r#"
[oracle]

[handlers.face_recognition]
"#,
    )
    .expect("empty sections should default");
    assert_eq!(config.oracle.timeout_secs, 30);
    assert_eq!(config.handlers.face_recognition.timeout_secs, 60);
}

/// Wrong value type surfaces as an InvalidType (or Other) diagnostic, not a
/// panic.
#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str(
        r#"
[gateway]
port = "not-a-number"
"#,
    )
    .expect_err("string port should fail");
    assert!(!errors.is_empty());
}
