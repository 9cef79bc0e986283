//! Model stage — picks a tag when no guardrail fires.
//!
//! `TagModel` is the seam where a real classifier (an LLM prompted with the
//! closed tag set) plugs in. Its only contract: return exactly one element of
//! `valid_tags`. The bundled `MockTagModel` is a heuristic stand-in.
//!
//! **Not deterministic by default.** When neither a keyword nor a tag name is
//! found in the text, `MockTagModel` asks its `TagChooser` for a uniform pick.
//! Use `FirstChooser` or `SeededChooser` for reproducible output.

use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

// ── Choosers ────────────────────────────────────────────────────────

/// Picks one element from a non-empty tag list.
pub trait TagChooser: Send + Sync {
    /// Returns `None` only when `tags` is empty.
    fn choose<'a>(&self, tags: &'a [String]) -> Option<&'a String>;
}

/// Uniform pick from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl TagChooser for RandomChooser {
    fn choose<'a>(&self, tags: &'a [String]) -> Option<&'a String> {
        tags.choose(&mut rand::thread_rng())
    }
}

/// Uniform pick from a seeded RNG. Same seed, same sequence of picks.
#[derive(Debug)]
pub struct SeededChooser {
    rng: Mutex<StdRng>,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TagChooser for SeededChooser {
    fn choose<'a>(&self, tags: &'a [String]) -> Option<&'a String> {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        tags.choose(&mut *rng)
    }
}

/// Always picks the first tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChooser;

impl TagChooser for FirstChooser {
    fn choose<'a>(&self, tags: &'a [String]) -> Option<&'a String> {
        tags.first()
    }
}

// ── Model ───────────────────────────────────────────────────────────

/// A classifier constrained to a closed tag set.
pub trait TagModel: Send + Sync {
    /// Model name for logging.
    fn name(&self) -> &str;

    /// Pick one tag for `text`. `valid_tags` is non-empty.
    fn classify(&self, text: &str, valid_tags: &[String]) -> String;
}

/// Heuristic stand-in for a model call.
///
/// 1. First tag (in the given order) whose lower-cased name occurs in the text.
/// 2. Otherwise whatever the chooser picks.
pub struct MockTagModel {
    chooser: Box<dyn TagChooser>,
}

impl MockTagModel {
    /// Mock model with a random fallback.
    pub fn new() -> Self {
        Self::with_chooser(RandomChooser)
    }

    /// Mock model with a custom fallback chooser.
    pub fn with_chooser(chooser: impl TagChooser + 'static) -> Self {
        Self {
            chooser: Box::new(chooser),
        }
    }
}

impl Default for MockTagModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TagModel for MockTagModel {
    fn name(&self) -> &str {
        "mock"
    }

    fn classify(&self, text: &str, valid_tags: &[String]) -> String {
        let text_lower = text.to_lowercase();
        if let Some(tag) = valid_tags
            .iter()
            .find(|tag| text_lower.contains(&tag.to_lowercase()))
        {
            return tag.clone();
        }

        self.chooser
            .choose(valid_tags)
            .cloned()
            .unwrap_or_default()
    }
}
