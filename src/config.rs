use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::{Result, TaggerError}, tagger::{snippet::SnippetPolicy, token::LineNumbering}};

/// Minimum share of the topic votes the leading tag needs to be accepted.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.33;

/// Accept a confidence threshold in `[0, 1]`
pub(crate) fn check_threshold(threshold: f64) -> Result<f64> {
    // NaN もここで弾かれる
    if !(0.0..=1.0).contains(&threshold) {
        return Err(TaggerError::InvalidThreshold(threshold));
    }
    Ok(threshold)
}

/// Runtime configuration of a `TagDeriver`
///
/// Every field has a default, so a partial JSON file such as
/// `{"confidence_threshold": 0.5}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// winner_count / vote_sum must reach this value
    pub confidence_threshold: f64,
    /// How token records are positioned
    pub line_numbering: LineNumbering,
    /// Whether empty snippets are reported
    pub snippet_policy: SnippetPolicy,
    /// Replaces the built-in linking word list when set
    pub linking_words: Option<Vec<String>>,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            line_numbering: LineNumbering::default(),
            snippet_policy: SnippetPolicy::default(),
            linking_words: None,
        }
    }
}

impl TaggerConfig {
    /// Load and validate a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: TaggerConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_threshold(self.confidence_threshold)?;
        Ok(())
    }

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_line_numbering(mut self, line_numbering: LineNumbering) -> Self {
        self.line_numbering = line_numbering;
        self
    }

    pub fn with_snippet_policy(mut self, policy: SnippetPolicy) -> Self {
        self.snippet_policy = policy;
        self
    }

    pub fn with_linking_words<T: AsRef<str>>(mut self, words: &[T]) -> Self {
        self.linking_words = Some(words.iter().map(|w| w.as_ref().to_string()).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_legacy_threshold() {
        let config = TaggerConfig::default();
        assert_eq!(config.confidence_threshold, 0.33);
        assert_eq!(config.line_numbering, LineNumbering::PerLine);
        assert_eq!(config.snippet_policy, SnippetPolicy::SkipEmpty);
        assert!(config.linking_words.is_none());
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = TaggerConfig::from_json_str(r#"{"line_numbering":"document_end"}"#).unwrap();
        assert_eq!(config.line_numbering, LineNumbering::DocumentEnd);
        assert_eq!(config.confidence_threshold, DEFAULT_CONFIDENCE_THRESHOLD);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = TaggerConfig::from_json_str(r#"{"confidence_threshold":1.5}"#).unwrap_err();
        assert!(matches!(err, TaggerError::InvalidThreshold(t) if t == 1.5));
        assert!(TaggerConfig::default().with_confidence_threshold(f64::NAN).validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"confidence_threshold":0.5,"linking_words":["und"],"snippet_policy":"keep_empty"}}"#).unwrap();
        let config = TaggerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.confidence_threshold, 0.5);
        assert_eq!(config.linking_words, Some(vec!["und".to_string()]));
        assert_eq!(config.snippet_policy, SnippetPolicy::KeepEmpty);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = TaggerConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, TaggerError::Json(_)));
    }
}
