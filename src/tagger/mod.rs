pub mod corpus;
pub mod evaluate;
pub mod serde;
pub mod snippet;
pub mod stopwords;
pub mod submission;
pub mod token;

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    config::TaggerConfig,
    error::Result,
    tagger::{
        corpus::Vocabulary,
        evaluate::classify::{Classification, TagClassifier},
        snippet::SnippetExtractor,
        stopwords::LinkingWords,
        submission::{FileReport, Submission, SubmissionReport, UploadedFile},
        token::{Tokenized, Tokenizer},
    },
};

/// Tokenizer, classifier and snippet extractor bound to one shared vocabulary
#[derive(Debug, Clone)]
pub struct TagDeriver {
    /// Vocabulary reference
    pub vocabulary_ref: Arc<Vocabulary>,
    config: TaggerConfig,
    tokenizer: Tokenizer,
    classifier: TagClassifier,
    extractor: SnippetExtractor,
}

impl TagDeriver {
    /// Create a new TagDeriver with the default configuration
    pub fn new(vocabulary_ref: Arc<Vocabulary>) -> Self {
        Self::build(vocabulary_ref, TaggerConfig::default(), TagClassifier::default())
    }

    /// Create a new TagDeriver, validating `config` first
    pub fn with_config(vocabulary_ref: Arc<Vocabulary>, config: TaggerConfig) -> Result<Self> {
        let classifier = TagClassifier::new(config.confidence_threshold)?;
        Ok(Self::build(vocabulary_ref, config, classifier))
    }

    fn build(vocabulary_ref: Arc<Vocabulary>, config: TaggerConfig, classifier: TagClassifier) -> Self {
        let linking_words = match &config.linking_words {
            Some(words) => LinkingWords::from_list(words),
            None => LinkingWords::default(),
        };
        let tokenizer = Tokenizer::new()
            .with_linking_words(linking_words)
            .with_line_numbering(config.line_numbering);
        let extractor = SnippetExtractor::new(config.snippet_policy);
        Self { vocabulary_ref, config, tokenizer, classifier, extractor }
    }

    /// set vocabulary reference
    pub fn set_vocabulary_ref(&mut self, vocabulary_ref: Arc<Vocabulary>) {
        self.vocabulary_ref = vocabulary_ref;
    }

    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    pub fn tokenize(&self, text: &str) -> Tokenized {
        self.tokenizer.tokenize(text)
    }

    pub fn classify<T: AsRef<str>>(&self, tokens: &[T]) -> Classification {
        self.classifier.classify(tokens, &self.vocabulary_ref)
    }

    pub fn extract_snippets(&self, token: &str, document: &str) -> Vec<String> {
        self.extractor.extract(token, document)
    }

    /// Tokenize, classify and collect snippets for one file
    pub fn process_file(&self, file: &UploadedFile) -> FileReport {
        debug!(file = %file.name, chars = file.content.len(), "processing file");
        let tokenized = self.tokenize(&file.content);
        let classification = self.classify(&tokenized.tokens);

        let mut snippets: IndexMap<String, Vec<String>> = IndexMap::new();
        for token in classification.token_histogram.keys() {
            let found = self.extract_snippets(token, &file.content);
            if !found.is_empty() {
                snippets.insert(token.clone(), found);
            }
        }

        info!(
            file = %file.name,
            tokens = tokenized.len(),
            tag = %classification.tag,
            "file classified"
        );
        FileReport {
            filename: file.name.clone(),
            tokenized,
            classification,
            snippets,
        }
    }

    /// Process a whole submission
    ///
    /// Files are independent and processed in parallel, the reports keep
    /// upload order. Typed input is only tokenized.
    ///
    /// # Errors
    /// * `TaggerError::EmptySubmission` - blank input and no files
    pub fn process_submission(&self, submission: &Submission) -> Result<SubmissionReport> {
        submission.validate()?;
        info!(
            files = submission.uploaded_files.len(),
            input_chars = submission.user_input.len(),
            vocabulary = self.vocabulary_ref.len(),
            "processing submission"
        );
        let files: Vec<FileReport> = submission.uploaded_files
            .par_iter()
            .map(|file| self.process_file(file))
            .collect();
        let user_input = if submission.user_input.trim().is_empty() {
            None
        } else {
            let tokenized = self.tokenize(submission.user_input.trim());
            debug!(tokens = tokenized.len(), "tokenized user input");
            Some(tokenized)
        };
        Ok(SubmissionReport { files, user_input })
    }
}
