/// This crate derives the topic tag of a text from a token → tag vocabulary.
pub mod tagger;
pub mod config;
pub mod error;

/// Tag Deriver
/// The top-level struct of this crate, bundling the tokenizer, the tag
/// classifier and the snippet extractor around one vocabulary.
///
/// Internally, it holds:
/// - A shared vocabulary reference (`Arc<Vocabulary>`)
/// - The configuration it was built from
/// - A configured tokenizer, classifier and snippet extractor
///
/// Whole submissions (typed text plus uploaded files) are processed with
/// `process_submission`; files are handled in parallel.
pub use tagger::TagDeriver;

/// Vocabulary
/// Root token → tag associations harvested from previously classified
/// documents. Duplicate tokens resolve last-writer-wins, tags keep their
/// first-seen order, which is also the tie-break order of the classifier.
///
/// # Serialization
/// Snapshots hold the ordered tag list and the `[token, tag]` pairs, stored
/// as JSON or CBOR. Bare pair lists are accepted on load.
pub use tagger::corpus::Vocabulary;

/// Tokenizer and token records
/// Splits text on `'\n'` and `' '`, drops empty pieces and linking words,
/// and records the position of every kept token.
pub use tagger::token::{tokenize, LineNumbering, TokenRecord, Tokenized, Tokenizer};

/// Tag classifier
/// Frequency-vote heuristic: every distinct token votes for the tag it resolves
/// to through its case variants, and the leading tag is accepted when it holds
/// at least the configured share (0.33 by default) of the votes.
pub use tagger::evaluate::classify::{classify, Classification, TagClassifier, Topic, UNKNOWN_TAG};

/// Snippet extractor
/// Short, punctuation-bounded neighborhoods of a token, one per line.
pub use tagger::snippet::{extract_snippets, grab_line, SnippetExtractor, SnippetPolicy};

/// Linking words filtered by the tokenizer
pub use tagger::stopwords::{LinkingWords, LINKING_WORDS};

/// Submission handling
/// - `Submission`, `UploadedFile`: input of `TagDeriver::process_submission`
/// - `FileReport`, `SubmissionReport`: its output
/// - `IdentityResolver`: implemented by storage to stamp persisted identities
pub use tagger::submission::{FileReport, IdentityResolver, Submission, SubmissionReport, UploadedFile};

pub use tagger::serde::SnapshotFormat;
pub use config::TaggerConfig;
pub use error::{Result, TaggerError};
