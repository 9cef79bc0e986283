//! Tag classification for inbound support emails.
//!
//! Every email is classified against the tag set configured for its customer:
//! 1. `GuardrailTable::evaluate()` — fixed keyword rules (no model call)
//! 2. `TagModel::classify()` — model-backed (currently mocked) fallback
//!
//! **A result never carries a tag outside the caller's valid set.** An empty
//! set yields the `"Unknown"` sentinel instead.

pub mod engine;
pub mod guardrails;
pub mod model;
pub mod types;

pub use engine::ClassificationEngine;
pub use guardrails::{GuardrailRule, GuardrailTable};
pub use model::{FirstChooser, MockTagModel, RandomChooser, SeededChooser, TagChooser, TagModel};
pub use types::{ClassificationRequest, ClassificationResult, Source};
