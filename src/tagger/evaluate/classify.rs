use std::fmt::{self, Debug, Display};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::{
    config::{check_threshold, DEFAULT_CONFIDENCE_THRESHOLD},
    error::Result,
    tagger::corpus::Vocabulary,
};

/// Sentinel name of the unresolved topic
pub const UNKNOWN_TAG: &str = "Unknown";

/// Resolved topic of a token or a whole document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    Known(String),
    Unknown,
}

impl Topic {
    pub fn as_str(&self) -> &str {
        match self {
            Topic::Known(tag) => tag.as_str(),
            Topic::Unknown => UNKNOWN_TAG,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Topic::Known(_))
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// serialized as the bare tag name, `"Unknown"` for the sentinel
impl Serialize for Topic {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl PartialEq<&str> for Topic {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Result of a classification call
#[derive(Clone, Serialize)]
pub struct Classification {
    /// decided topic
    pub tag: Topic,
    /// distinct document token → resolved topic, document order
    pub token_histogram: IndexMap<String, Topic>,
    /// vocabulary tag → number of distinct document tokens voting for it,
    /// vocabulary tag order
    pub topic_histogram: IndexMap<String, u64>,
}

impl Classification {
    fn unknown() -> Self {
        Classification {
            tag: Topic::Unknown,
            token_histogram: IndexMap::new(),
            topic_histogram: IndexMap::new(),
        }
    }

    /// Total votes cast
    pub fn vote_sum(&self) -> u64 {
        self.topic_histogram.values().sum()
    }

    /// Share of the votes held by the decided tag, 0.0 when unknown
    pub fn confidence(&self) -> f64 {
        let sum = self.vote_sum();
        match &self.tag {
            Topic::Known(tag) if sum > 0 => {
                self.topic_histogram.get(tag).copied().unwrap_or(0) as f64 / sum as f64
            }
            _ => 0.0,
        }
    }
}

impl Debug for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Classification [{}] (confidence {:.3})", self.tag, self.confidence())?;
            for (tag, count) in &self.topic_histogram {
                writeln!(f, "    {}: {}", tag, count)?;
            }
            write!(f, "]")
        } else {
            f.debug_struct("Classification")
                .field("tag", &self.tag)
                .field("token_histogram", &self.token_histogram)
                .field("topic_histogram", &self.topic_histogram)
                .finish()
        }
    }
}

/// Frequency-vote classifier over a vocabulary
#[derive(Debug, Clone, Copy)]
pub struct TagClassifier {
    confidence_threshold: f64,
}

impl Default for TagClassifier {
    fn default() -> Self {
        Self { confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD }
    }
}

impl TagClassifier {
    /// # Errors
    /// `TaggerError::InvalidThreshold` unless `0.0 <= confidence_threshold <= 1.0`
    pub fn new(confidence_threshold: f64) -> Result<Self> {
        Ok(Self { confidence_threshold: check_threshold(confidence_threshold)? })
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Look up the case variants of a token in the vocabulary
    ///
    /// Order: trimmed lowercase, original, trimmed uppercase, trimmed capitalized.
    /// The first hit wins.
    pub fn resolve<'v>(token: &str, vocabulary: &'v Vocabulary) -> Option<&'v str> {
        let trimmed = token.trim();
        vocabulary.get(&trimmed.to_lowercase())
            .or_else(|| vocabulary.get(token))
            .or_else(|| vocabulary.get(&trimmed.to_uppercase()))
            .or_else(|| vocabulary.get(&capitalize(trimmed)))
    }

    /// Classify a document's tokens
    ///
    /// # Arguments
    /// * `tokens` - document tokens, repeats count once
    /// * `vocabulary` - root token → tag associations
    ///
    /// # Returns
    /// * `Classification` - decided topic and both histograms
    pub fn classify<T: AsRef<str>>(&self, tokens: &[T], vocabulary: &Vocabulary) -> Classification {
        if tokens.is_empty() {
            debug!("no tokens, classified as Unknown");
            return Classification::unknown();
        }

        // 全タグを 0 で初期化 (タイブレークは語彙の挿入順)
        let mut topic_histogram: IndexMap<String, u64> =
            vocabulary.tags().map(|tag| (tag.to_string(), 0)).collect();

        let mut token_histogram: IndexMap<String, Topic> = IndexMap::with_capacity(tokens.len());
        for token in tokens {
            let token = token.as_ref();
            if token_histogram.contains_key(token) {
                continue;
            }
            let topic = match Self::resolve(token, vocabulary) {
                Some(tag) => {
                    if let Some(count) = topic_histogram.get_mut(tag) {
                        *count += 1;
                    }
                    Topic::Known(tag.to_string())
                }
                None => Topic::Unknown,
            };
            debug!(token, topic = %topic, "resolved token");
            token_histogram.insert(token.to_string(), topic);
        }

        let tag = self.decide(&topic_histogram, tokens.len());
        Classification { tag, token_histogram, topic_histogram }
    }

    fn decide(&self, topic_histogram: &IndexMap<String, u64>, token_num: usize) -> Topic {
        let sum: u64 = topic_histogram.values().sum();
        if sum == 0 {
            warn!(tokens = token_num, "no token matched the vocabulary, classified as Unknown");
            return Topic::Unknown;
        }
        // strict `>` keeps the earliest tag on ties
        let mut winner: Option<(&String, u64)> = None;
        for (tag, &count) in topic_histogram {
            if winner.map_or(true, |(_, best)| count > best) {
                winner = Some((tag, count));
            }
        }
        match winner {
            Some((tag, count)) if count as f64 / sum as f64 >= self.confidence_threshold => {
                info!(tag = %tag, matches = count, tokens = token_num, "classified under tag");
                Topic::Known(tag.clone())
            }
            Some((tag, count)) => {
                warn!(tag = %tag, matches = count, votes = sum, "low confidence match, classified as Unknown");
                Topic::Unknown
            }
            None => Topic::Unknown,
        }
    }
}

/// First char uppercase, rest lowercase
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Classify with the default confidence threshold
pub fn classify<T: AsRef<str>>(tokens: &[T], vocabulary: &Vocabulary) -> Classification {
    TagClassifier::default().classify(tokens, vocabulary)
}
