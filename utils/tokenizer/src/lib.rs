//! Query and document tokenization.
//!
//! Text is lower-cased, split on whitespace, stripped of every character that
//! is neither alphanumeric nor `_`, and filtered against a fixed stop-word
//! list. Each surviving term is then passed through a [`TermNormalizer`];
//! the default normalizer leaves terms unchanged.

use std::fmt;
use std::sync::Arc;

/// Articles, prepositions and auxiliary verbs dropped from every token stream.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did",
    "will", "would",
];

/// Post-processing hook applied to each term after stop-word removal.
///
/// A stemmer plugs in here; the tokenizer contract does not change.
pub trait TermNormalizer: Send + Sync {
    fn normalize(&self, term: String) -> String;
}

/// Leaves terms untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNormalizer;

impl TermNormalizer for NoopNormalizer {
    fn normalize(&self, term: String) -> String {
        term
    }
}

#[derive(Clone)]
pub struct Tokenizer {
    normalizer: Arc<dyn TermNormalizer>,
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer").finish_non_exhaustive()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::with_normalizer(Arc::new(NoopNormalizer))
    }

    pub fn with_normalizer(normalizer: Arc<dyn TermNormalizer>) -> Self {
        Self { normalizer }
    }

    /// Split `text` into normalized, stop-word-free terms, preserving order
    /// and duplicates.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|word| !word.is_empty() && !is_stop_word(word))
            .map(|word| self.normalizer.normalize(word))
            .filter(|term| !term.is_empty())
            .collect()
    }
}

/// Tokenize with the default (no-op) normalizer.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::new().tokenize(text)
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

fn strip_punctuation(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}
