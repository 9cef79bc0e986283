//! Shared types for tag classification.

use serde::{Deserialize, Serialize};

/// Tag returned when the caller supplies no valid tags.
pub const UNKNOWN_TAG: &str = "Unknown";

/// Confidence for a guardrail keyword hit.
pub const GUARDRAIL_CONFIDENCE: f32 = 0.95;

/// Confidence for a tag picked by the model stage.
pub const MODEL_CONFIDENCE: f32 = 0.85;

/// Confidence when there is nothing to choose from.
pub const NO_TAGS_CONFIDENCE: f32 = 0.0;

/// Explanation attached to every model-stage result.
pub const MODEL_EXPLANATION: &str = "LLM analyzed the context and selected the most likely tag.";

// ── Request ─────────────────────────────────────────────────────────

/// Body of a prediction request.
///
/// Only the text and the tenant are supplied by the caller; the valid tag
/// set is looked up from the tenant's configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Raw email text. May be empty.
    pub email_text: String,
    /// Opaque tenant key.
    pub customer_id: String,
}

// ── Provenance ──────────────────────────────────────────────────────

/// Which decision path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "No valid tags")]
    NoValidTags,
    #[serde(rename = "Pattern Matching")]
    PatternMatching,
    #[serde(rename = "Mock LLM")]
    MockLlm,
}

impl Source {
    /// Wire label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoValidTags => "No valid tags",
            Self::PatternMatching => "Pattern Matching",
            Self::MockLlm => "Mock LLM",
        }
    }

    /// Fixed confidence for this path.
    pub fn confidence(&self) -> f32 {
        match self {
            Self::NoValidTags => NO_TAGS_CONFIDENCE,
            Self::PatternMatching => GUARDRAIL_CONFIDENCE,
            Self::MockLlm => MODEL_CONFIDENCE,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Result ──────────────────────────────────────────────────────────

/// Outcome of classifying one email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// One of the valid tags, or `"Unknown"` when none were supplied.
    pub tag: String,
    /// Path-based trust level, not a calibrated probability.
    pub confidence: f32,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ClassificationResult {
    /// Result for an empty tag set.
    pub fn no_valid_tags() -> Self {
        Self {
            tag: UNKNOWN_TAG.to_string(),
            confidence: Source::NoValidTags.confidence(),
            source: Source::NoValidTags,
            explanation: None,
        }
    }

    /// Result for a guardrail keyword hit.
    pub fn pattern_match(keyword: &str, tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            confidence: Source::PatternMatching.confidence(),
            source: Source::PatternMatching,
            explanation: Some(format!(
                "Found keyword '{keyword}' which strongly indicates '{tag}'."
            )),
        }
    }

    /// Result for a tag chosen by the model stage.
    pub fn model(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            confidence: Source::MockLlm.confidence(),
            source: Source::MockLlm,
            explanation: Some(MODEL_EXPLANATION.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_serializes_to_wire_labels() {
        assert_eq!(
            serde_json::to_value(Source::NoValidTags).unwrap(),
            "No valid tags"
        );
        assert_eq!(
            serde_json::to_value(Source::PatternMatching).unwrap(),
            "Pattern Matching"
        );
        assert_eq!(serde_json::to_value(Source::MockLlm).unwrap(), "Mock LLM");
    }

    #[test]
    fn source_label_matches_display() {
        for source in [Source::NoValidTags, Source::PatternMatching, Source::MockLlm] {
            assert_eq!(source.to_string(), source.label());
        }
    }

    #[test]
    fn no_valid_tags_result_omits_explanation() {
        let json = serde_json::to_value(ClassificationResult::no_valid_tags()).unwrap();
        assert_eq!(json["tag"], "Unknown");
        assert_eq!(json["confidence"], 0.0);
        assert_eq!(json["source"], "No valid tags");
        assert!(json.get("explanation").is_none());
    }

    #[test]
    fn pattern_match_explanation_names_keyword_and_tag() {
        let result = ClassificationResult::pattern_match("crash", "Bug");
        assert_eq!(result.confidence, GUARDRAIL_CONFIDENCE);
        assert_eq!(
            result.explanation.as_deref(),
            Some("Found keyword 'crash' which strongly indicates 'Bug'.")
        );
    }

    #[test]
    fn model_result_uses_fixed_explanation() {
        let result = ClassificationResult::model("Billing");
        assert_eq!(result.source, Source::MockLlm);
        assert_eq!(result.confidence, MODEL_CONFIDENCE);
        assert_eq!(result.explanation.as_deref(), Some(MODEL_EXPLANATION));
    }

    #[test]
    fn request_requires_both_fields() {
        let ok: Result<ClassificationRequest, _> =
            serde_json::from_str(r#"{"email_text": "hi", "customer_id": "acme"}"#);
        assert!(ok.is_ok());

        let missing: Result<ClassificationRequest, _> =
            serde_json::from_str(r#"{"customer_id": "acme"}"#);
        assert!(missing.is_err());
    }
}
