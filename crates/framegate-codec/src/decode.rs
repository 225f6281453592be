// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Defensive decoding of oracle replies.

use std::collections::BTreeSet;
use std::str::FromStr;

use framegate_core::{RoutingDecision, RoutingLabel};
use serde_json::Value;
use tracing::debug;

/// Interpret the oracle's raw reply, tolerating prose around the JSON object.
///
/// Validation rules are applied in order, first failure wins; every failure
/// yields a `malformed` decision rather than an error.
pub(crate) fn decode(allowed: &BTreeSet<RoutingLabel>, raw: &str) -> RoutingDecision {
    // The oracle often wraps the object in prose or code fences; take the
    // outermost brace span.
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return RoutingDecision::rejected("no JSON object found in oracle reply");
    };
    if end < start {
        return RoutingDecision::rejected("no JSON object found in oracle reply");
    }

    let value: Value = match serde_json::from_str(&raw[start..=end]) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "oracle reply span is not valid JSON");
            return RoutingDecision::rejected(format!("oracle reply is not valid JSON: {err}"));
        }
    };

    let Some(route_value) = value.get("route") else {
        return RoutingDecision::rejected("oracle reply is missing the `route` key");
    };
    let Some(confidence_value) = value.get("confidence") else {
        return RoutingDecision::rejected("oracle reply is missing the `confidence` key");
    };

    let Some(confidence) = coerce_confidence(confidence_value) else {
        return RoutingDecision::rejected(format!(
            "oracle confidence `{confidence_value}` is not a number"
        ));
    };

    let route = match route_value.as_str().map(RoutingLabel::from_str) {
        Some(Ok(label)) if allowed.contains(&label) => label,
        _ => {
            return RoutingDecision::rejected(format!(
                "oracle route `{route_value}` is not an accepted label"
            ));
        }
    };

    let reasoning = value
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    RoutingDecision {
        route,
        confidence: confidence.clamp(0.0, 1.0),
        reasoning,
        malformed: false,
    }
}

/// Coerce the confidence value to a finite real number.
///
/// Accepts JSON numbers and numeric strings (the oracle occasionally quotes
/// the value). Non-finite values cannot be repaired by clamping and are
/// rejected.
fn coerce_confidence(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec_allowed() -> BTreeSet<RoutingLabel> {
        [
            RoutingLabel::FaceRecognition,
            RoutingLabel::SignLanguage,
            RoutingLabel::None,
        ]
        .into_iter()
        .collect()
    }

    fn decode_with_all(raw: &str) -> RoutingDecision {
        decode(&codec_allowed(), raw)
    }

    #[test]
    fn well_formed_reply_parses_exactly() {
        let decision = decode_with_all(
            r#"{"route": "face_recognition", "confidence": 0.92, "reasoning": "face visible"}"#,
        );
        assert!(!decision.malformed);
        assert_eq!(decision.route, RoutingLabel::FaceRecognition);
        assert_eq!(decision.confidence, 0.92);
        assert_eq!(decision.reasoning, "face visible");
    }

    #[test]
    fn json_wrapped_in_prose_is_extracted() {
        let decision = decode_with_all(
            "Sure! Here is my routing decision:\n```json\n{\"route\": \"sign_language\", \"confidence\": 0.8, \"reasoning\": \"hands prominent\"}\n```\nLet me know if you need more.",
        );
        assert!(!decision.malformed);
        assert_eq!(decision.route, RoutingLabel::SignLanguage);
        assert_eq!(decision.confidence, 0.8);
    }

    #[test]
    fn plain_prose_is_malformed() {
        let decision = decode_with_all("I could not determine a route for this frame.");
        assert!(decision.malformed);
        assert_eq!(decision.route, RoutingLabel::None);
        assert_eq!(decision.confidence, 0.0);
    }

    #[test]
    fn reversed_braces_are_malformed() {
        let decision = decode_with_all("} oops {");
        assert!(decision.malformed);
        assert_eq!(decision.route, RoutingLabel::None);
    }

    #[test]
    fn invalid_json_span_is_malformed() {
        let decision = decode_with_all("{route: face_recognition, confidence: high}");
        assert!(decision.malformed);
        assert!(decision.reasoning.contains("not valid JSON"));
    }

    #[test]
    fn missing_route_key_is_malformed() {
        let decision = decode_with_all(r#"{"confidence": 0.9}"#);
        assert!(decision.malformed);
        assert!(decision.reasoning.contains("`route`"));
    }

    #[test]
    fn missing_confidence_key_is_malformed() {
        let decision = decode_with_all(r#"{"route": "face_recognition"}"#);
        assert!(decision.malformed);
        assert!(decision.reasoning.contains("`confidence`"));
    }

    #[test]
    fn non_numeric_confidence_is_malformed() {
        let decision =
            decode_with_all(r#"{"route": "face_recognition", "confidence": "very high"}"#);
        assert!(decision.malformed);
        assert!(decision.reasoning.contains("not a number"));
    }

    #[test]
    fn quoted_numeric_confidence_is_coerced() {
        let decision = decode_with_all(r#"{"route": "face_recognition", "confidence": "0.85"}"#);
        assert!(!decision.malformed);
        assert_eq!(decision.confidence, 0.85);
    }

    #[test]
    fn route_outside_label_set_is_malformed() {
        let decision = decode_with_all(r#"{"route": "speech", "confidence": 0.9}"#);
        assert!(decision.malformed);
        assert_eq!(decision.route, RoutingLabel::None);
        assert_eq!(decision.confidence, 0.0);
        assert!(decision.reasoning.contains("not an accepted label"));
    }

    #[test]
    fn known_label_outside_configured_set_is_malformed() {
        // Deployment with only the face handler registered.
        let allowed: BTreeSet<RoutingLabel> =
            [RoutingLabel::FaceRecognition, RoutingLabel::None]
                .into_iter()
                .collect();
        let decision = decode(
            &allowed,
            r#"{"route": "sign_language", "confidence": 0.9}"#,
        );
        assert!(decision.malformed);
    }

    #[test]
    fn none_route_is_always_accepted() {
        let decision = decode_with_all(r#"{"route": "none", "confidence": 0.3}"#);
        assert!(!decision.malformed);
        assert_eq!(decision.route, RoutingLabel::None);
    }

    #[test]
    fn confidence_is_clamped_into_unit_interval() {
        let decision = decode_with_all(r#"{"route": "face_recognition", "confidence": 1.5}"#);
        assert!(!decision.malformed);
        assert_eq!(decision.confidence, 1.0);

        let decision = decode_with_all(r#"{"route": "face_recognition", "confidence": -0.2}"#);
        assert!(!decision.malformed);
        assert_eq!(decision.confidence, 0.0);
    }

    #[test]
    fn missing_reasoning_defaults_to_empty() {
        let decision = decode_with_all(r#"{"route": "face_recognition", "confidence": 0.9}"#);
        assert!(!decision.malformed);
        assert_eq!(decision.reasoning, "");
    }

    #[test]
    fn decode_is_deterministic() {
        let raw = r#"noise {"route": "face_recognition", "confidence": 0.75} noise"#;
        let first = decode_with_all(raw);
        let second = decode_with_all(raw);
        assert_eq!(first, second);
    }
}
