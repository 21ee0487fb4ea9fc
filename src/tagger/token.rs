use serde::{Deserialize, Serialize};
use tracing::debug;

use super::stopwords::LinkingWords;

/// How `TokenRecord::line_number` and `TokenRecord::token_index` are assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineNumbering {
    /// Line the token was found on, token index counted within that line
    #[default]
    PerLine,
    /// Legacy layout: every record carries the document's last line number
    /// and a document-wide token counter.
    /// Use it when records must line up with data persisted by older builds.
    DocumentEnd,
}

/// Positional record of a single token
///
/// `text_id` and `tag_id` stay 0 until the caller resolves them
/// against its storage (see `IdentityResolver`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub text_id: u64,
    pub token: String,
    /// pages are not detected, always 0
    pub page_number: u32,
    /// 1-based
    pub line_number: u32,
    /// 1-based, counts every raw token including filtered ones
    pub token_index: u32,
    pub tag_id: u64,
}

impl TokenRecord {
    fn new(token: &str, line_number: u32, token_index: u32) -> Self {
        TokenRecord {
            text_id: 0,
            token: token.to_string(),
            page_number: 0,
            line_number,
            token_index,
            tag_id: 0,
        }
    }

    /// Fill in the persisted identities
    pub fn assign_identity(&mut self, text_id: u64, tag_id: u64) -> &mut Self {
        self.text_id = text_id;
        self.tag_id = tag_id;
        self
    }
}

/// Output of `Tokenizer::tokenize`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tokenized {
    /// tokens in document order
    pub tokens: Vec<String>,
    /// one record per token, same order
    pub records: Vec<TokenRecord>,
}

impl Tokenized {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Splits text into positioned tokens
///
/// Lines are split on `'\n'` and tokens on a single `' '`.
/// No other whitespace normalization happens, so tabs stay inside tokens
/// and runs of spaces produce empty tokens, which are dropped.
///
/// # Examples
/// ```
/// use tag_deriver::Tokenizer;
/// let tokenized = Tokenizer::new().tokenize("the apple\nand a pear");
/// assert_eq!(tokenized.tokens, vec!["apple", "pear"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    linking_words: LinkingWords,
    line_numbering: LineNumbering,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_linking_words(mut self, linking_words: LinkingWords) -> Self {
        self.linking_words = linking_words;
        self
    }

    pub fn with_line_numbering(mut self, line_numbering: LineNumbering) -> Self {
        self.line_numbering = line_numbering;
        self
    }

    #[inline]
    fn keeps(&self, token: &str) -> bool {
        !token.is_empty() && !self.linking_words.contains(token)
    }

    /// Tokenize a text
    ///
    /// # Arguments
    /// * `text` - raw document text, an empty string yields empty output
    ///
    /// # Returns
    /// * `Tokenized` - tokens and their position records
    pub fn tokenize(&self, text: &str) -> Tokenized {
        let mut out = Tokenized::default();
        if text.is_empty() {
            return out;
        }
        match self.line_numbering {
            LineNumbering::PerLine => self.tokenize_per_line(text, &mut out),
            LineNumbering::DocumentEnd => self.tokenize_document_end(text, &mut out),
        }
        debug!(tokens = out.len(), numbering = ?self.line_numbering, "tokenized text");
        out
    }

    fn tokenize_per_line(&self, text: &str, out: &mut Tokenized) {
        for (line_idx, line) in text.split('\n').enumerate() {
            let line_number = line_idx as u32 + 1;
            for (tok_idx, token) in line.split(' ').enumerate() {
                if self.keeps(token) {
                    out.tokens.push(token.to_string());
                    out.records.push(TokenRecord::new(token, line_number, tok_idx as u32 + 1));
                }
            }
        }
    }

    /// 行分割とトークン分割が別パスで同じカウンタを共有していた旧実装の再現
    fn tokenize_document_end(&self, text: &str, out: &mut Tokenized) {
        let lines: Vec<&str> = text.split('\n').collect();
        let last_line = lines.len() as u32;
        let raw_tokens = lines.iter().flat_map(|line| line.split(' '));
        for (tok_idx, token) in raw_tokens.enumerate() {
            if self.keeps(token) {
                out.tokens.push(token.to_string());
                out.records.push(TokenRecord::new(token, last_line, tok_idx as u32 + 1));
            }
        }
    }
}

/// Tokenize with the built-in linking words and per-line numbering
pub fn tokenize(text: &str) -> Tokenized {
    Tokenizer::new().tokenize(text)
}
