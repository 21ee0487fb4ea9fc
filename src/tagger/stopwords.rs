//! Linking word filtering
//!
//! Linking words (articles, conjunctions, prepositions) carry no topic and are
//! dropped by the tokenizer. Membership is exact and case-sensitive.

use std::collections::HashSet;

/// Built-in English linking words
pub const LINKING_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // coordinating conjunctions
    "and", "or", "but", "nor", "so", "yet", "for",
    // subordinating conjunctions
    "if", "because", "although", "though", "while", "whereas", "unless", "since",
    "than", "that", "whether", "when", "where", "as",
    // prepositions
    "of", "in", "on", "at", "to", "from", "by", "with", "without", "about",
    "into", "onto", "over", "under", "between", "among", "through", "during",
    "before", "after", "above", "below", "up", "down", "out", "off", "upon",
    "within", "across", "against", "along", "around", "behind", "beyond",
    "toward", "towards", "via",
    // capitalized sentence openers
    "A", "An", "The", "And", "Or", "But", "If", "In", "On", "Of", "To", "For",
];

#[derive(Debug, Clone)]
pub struct LinkingWords {
    words: HashSet<Box<str>>,
}

impl Default for LinkingWords {
    fn default() -> Self {
        Self::from_list(LINKING_WORDS)
    }
}

impl LinkingWords {
    /// Create a filter from a custom list
    pub fn from_list<T: AsRef<str>>(words: &[T]) -> Self {
        Self {
            words: words.iter().map(|w| Box::from(w.as_ref())).collect(),
        }
    }

    /// Filter that keeps every token
    pub fn empty() -> Self {
        Self { words: HashSet::new() }
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
