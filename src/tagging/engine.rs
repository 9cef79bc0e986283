//! Classification engine — guardrails first, then the model stage.
//!
//! **Core invariant: a non-empty tag set is never escaped.** Every result's
//! tag is a member of the caller's `valid_tags`, even when a substituted
//! `TagModel` misbehaves.
//!
//! Flow:
//! 1. Empty tag set → `"Unknown"` with zero confidence
//! 2. Guardrail keyword hit → fixed high confidence
//! 3. Model stage → fixed lower confidence

use std::sync::Arc;

use tracing::{debug, warn};

use crate::tagging::guardrails::GuardrailTable;
use crate::tagging::model::{MockTagModel, SeededChooser, TagModel};
use crate::tagging::types::ClassificationResult;

/// Stateless classifier shared across callers.
///
/// Holds only read-only values, so one instance can serve concurrent
/// requests behind an `Arc` without locking.
pub struct ClassificationEngine {
    guardrails: Arc<GuardrailTable>,
    model: Arc<dyn TagModel>,
}

impl ClassificationEngine {
    /// Create an engine from a guardrail table and a model.
    pub fn new(guardrails: Arc<GuardrailTable>, model: Arc<dyn TagModel>) -> Self {
        Self { guardrails, model }
    }

    /// Default guardrails with a randomly-falling-back mock model.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(GuardrailTable::default_rules()),
            Arc::new(MockTagModel::new()),
        )
    }

    /// Default guardrails, with a seeded fallback when `seed` is set.
    pub fn with_seed(seed: Option<u64>) -> Self {
        let model = match seed {
            Some(seed) => MockTagModel::with_chooser(SeededChooser::new(seed)),
            None => MockTagModel::new(),
        };
        Self::new(Arc::new(GuardrailTable::default_rules()), Arc::new(model))
    }

    pub fn guardrails(&self) -> &GuardrailTable {
        &self.guardrails
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Classify one email against a customer's tag set.
    ///
    /// `customer_id` is only logged; the tag set alone decides what is valid.
    pub fn predict(
        &self,
        email_text: &str,
        customer_id: &str,
        valid_tags: &[String],
    ) -> ClassificationResult {
        if valid_tags.is_empty() {
            debug!(customer_id, "No valid tags for customer");
            return ClassificationResult::no_valid_tags();
        }

        if let Some(rule) = self.guardrails.evaluate(email_text, valid_tags) {
            let result = ClassificationResult::pattern_match(&rule.keyword, &rule.tag);
            debug!(
                customer_id,
                source = %result.source,
                tag = %result.tag,
                "Guardrail matched, skipping model"
            );
            return result;
        }

        let mut tag = self.model.classify(email_text, valid_tags);
        if !valid_tags.contains(&tag) {
            warn!(
                customer_id,
                model = self.model.name(),
                tag = %tag,
                "Model returned a tag outside the valid set, using first valid tag"
            );
            tag = valid_tags[0].clone();
        }

        let result = ClassificationResult::model(tag);
        debug!(
            customer_id,
            model = self.model.name(),
            source = %result.source,
            tag = %result.tag,
            "Model classified email"
        );
        result
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
