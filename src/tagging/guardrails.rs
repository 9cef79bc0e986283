//! Keyword guardrails that run before the model stage.
//!
//! Short-circuits obvious cases with a fixed keyword → tag table:
//! - "urgent" / "crash" → Bug
//! - "invoice" → Billing
//! - "return", "size", "shipping", "feature" → their matching tags
//!
//! A rule only fires when its tag is in the caller's valid set. Matching is a
//! case-insensitive substring test, so "size" also fires inside "oversized".

use tracing::debug;

/// A single keyword → tag rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardrailRule {
    /// Lower-cased literal trigger.
    pub keyword: String,
    /// Tag asserted when the keyword fires.
    pub tag: String,
}

impl GuardrailRule {
    pub fn new(keyword: &str, tag: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            tag: tag.to_string(),
        }
    }
}

/// Ordered keyword table. First qualifying rule wins.
#[derive(Debug, Clone)]
pub struct GuardrailTable {
    rules: Vec<GuardrailRule>,
}

impl GuardrailTable {
    /// Create a table with the default support-desk keywords.
    pub fn default_rules() -> Self {
        let rules = [
            ("urgent", "Bug"),
            ("crash", "Bug"),
            ("invoice", "Billing"),
            ("return", "Return"),
            ("size", "Size Issue"),
            ("shipping", "Shipping"),
            ("feature", "Feature Request"),
        ]
        .into_iter()
        .map(|(keyword, tag)| GuardrailRule::new(keyword, tag))
        .collect();

        Self { rules }
    }

    /// Create an empty table (for testing).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. It is checked after every existing rule.
    pub fn add_rule(&mut self, keyword: &str, tag: &str) {
        self.rules.push(GuardrailRule::new(keyword, tag));
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[GuardrailRule] {
        &self.rules
    }

    /// Find the first rule whose keyword occurs in `text` and whose tag is valid.
    ///
    /// Returns `None` when no keyword is present or every matching rule maps
    /// to a tag outside `valid_tags` (fall through to the model stage).
    /// An empty keyword occurs in every non-empty text.
    pub fn evaluate(&self, text: &str, valid_tags: &[String]) -> Option<&GuardrailRule> {
        if text.is_empty() {
            return None;
        }

        let text_lower = text.to_lowercase();
        for rule in &self.rules {
            if !text_lower.contains(&rule.keyword) {
                continue;
            }
            if valid_tags.iter().any(|t| *t == rule.tag) {
                debug!(keyword = %rule.keyword, tag = %rule.tag, "Guardrail keyword matched");
                return Some(rule);
            }
            debug!(
                keyword = %rule.keyword,
                tag = %rule.tag,
                "Guardrail keyword matched but tag is not valid for this customer"
            );
        }

        None
    }
}

impl Default for GuardrailTable {
    fn default() -> Self {
        Self::default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_table_order_is_fixed() {
        let table = GuardrailTable::default_rules();
        let keywords: Vec<&str> = table.rules().iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(
            keywords,
            ["urgent", "crash", "invoice", "return", "size", "shipping", "feature"]
        );
    }

    #[test]
    fn matches_case_insensitively() {
        let table = GuardrailTable::default_rules();
        let rule = table
            .evaluate("URGENT: app keeps crashing", &tags(&["Bug", "Billing"]))
            .unwrap();
        assert_eq!(rule.keyword, "urgent");
        assert_eq!(rule.tag, "Bug");
    }

    #[test]
    fn skips_rules_whose_tag_is_not_valid() {
        let table = GuardrailTable::default_rules();
        let result = table.evaluate("Please send my invoice", &tags(&["Return", "Size Issue"]));
        assert!(result.is_none());
    }

    #[test]
    fn later_rule_fires_when_earlier_tag_is_invalid() {
        let table = GuardrailTable::default_rules();
        // "invoice" → Billing is not valid, "return" → Return is.
        let rule = table
            .evaluate("invoice for my return", &tags(&["Return"]))
            .unwrap();
        assert_eq!(rule.keyword, "return");
    }

    #[test]
    fn first_rule_in_table_order_wins() {
        let table = GuardrailTable::default_rules();
        // "shipping" appears first in the text but "size" is earlier in the table.
        let rule = table
            .evaluate("shipping was fine but wrong size", &tags(&["Shipping", "Size Issue"]))
            .unwrap();
        assert_eq!(rule.tag, "Size Issue");
    }

    #[test]
    fn keyword_matches_inside_longer_words() {
        let table = GuardrailTable::default_rules();
        let rule = table
            .evaluate("The box was oversized", &tags(&["Size Issue"]))
            .unwrap();
        assert_eq!(rule.keyword, "size");
    }

    #[test]
    fn empty_text_never_matches() {
        let table = GuardrailTable::default_rules();
        assert!(table.evaluate("", &tags(&["Bug", "Billing"])).is_none());
    }

    #[test]
    fn empty_table_passes_everything() {
        let table = GuardrailTable::empty();
        assert!(table.evaluate("urgent crash", &tags(&["Bug"])).is_none());
    }

    #[test]
    fn custom_rule_is_appended_and_lowercased() {
        let mut table = GuardrailTable::empty();
        table.add_rule("Refund", "Billing");
        let rule = table.evaluate("I want a REFUND", &tags(&["Billing"])).unwrap();
        assert_eq!(rule.keyword, "refund");
        assert_eq!(rule.tag, "Billing");
    }

    #[test]
    fn empty_keyword_fires_on_any_text() {
        let mut table = GuardrailTable::empty();
        table.add_rule("", "Bug");
        let valid = tags(&["Bug", "Billing"]);
        let rule = table.evaluate("x", &valid).unwrap();
        assert_eq!(rule.tag, "Bug");
        assert!(table.evaluate("", &valid).is_none());
    }

    #[test]
    fn tag_membership_is_case_sensitive() {
        let table = GuardrailTable::default_rules();
        assert!(table.evaluate("app crash", &tags(&["bug"])).is_none());
    }
}
