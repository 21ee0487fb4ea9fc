use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{error::{Result, TaggerError}, tagger::{evaluate::classify::{Classification, Topic}, token::Tokenized}};

/// A file uploaded with a submission, content already decoded to text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub content: String,
}

impl UploadedFile {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, content: C) -> Self {
        Self { name: name.into(), content: content.into() }
    }
}

/// Typed text plus uploaded files, as posted by the submission form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub user_input: String,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
}

impl Submission {
    /// Rejects a submission with blank input and no files
    pub fn validate(&self) -> Result<()> {
        if self.user_input.trim().is_empty() && self.uploaded_files.is_empty() {
            return Err(TaggerError::EmptySubmission);
        }
        Ok(())
    }
}

/// Everything derived from one uploaded file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub filename: String,
    pub tokenized: Tokenized,
    pub classification: Classification,
    /// distinct token → snippets, tokens without snippets are left out
    pub snippets: IndexMap<String, Vec<String>>,
}

impl FileReport {
    pub fn tag(&self) -> &Topic {
        &self.classification.tag
    }

    /// Stamp every token record with the persisted text and tag identities
    ///
    /// Unresolved identities stay 0.
    pub fn resolve_identities<R: IdentityResolver + ?Sized>(&mut self, resolver: &R) {
        let text_id = resolver.text_id(&self.filename).unwrap_or(0);
        let tag_id = resolver.tag_id(&self.classification.tag).unwrap_or(0);
        for record in &mut self.tokenized.records {
            record.assign_identity(text_id, tag_id);
        }
    }
}

/// Result of a whole submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    /// one report per uploaded file, upload order
    pub files: Vec<FileReport>,
    /// tokenization of the typed input, if any
    pub user_input: Option<Tokenized>,
}

/// Storage-side identity lookup
///
/// Implemented by the persistence layer; the pipeline only knows positions.
pub trait IdentityResolver {
    /// identity of a stored text, by file name
    fn text_id(&self, name: &str) -> Option<u64>;
    /// identity of a tag, `Topic::Unknown` included
    fn tag_id(&self, tag: &Topic) -> Option<u64>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::tagger::{corpus::Vocabulary, evaluate::classify::classify, token::tokenize};

    struct MapResolver {
        texts: HashMap<&'static str, u64>,
        tags: HashMap<&'static str, u64>,
    }

    impl IdentityResolver for MapResolver {
        fn text_id(&self, name: &str) -> Option<u64> {
            self.texts.get(name).copied()
        }

        fn tag_id(&self, tag: &Topic) -> Option<u64> {
            self.tags.get(tag.as_str()).copied()
        }
    }

    fn report(name: &str, text: &str) -> FileReport {
        let vocab = Vocabulary::from_pairs([("apple", "fruit")]);
        let tokenized = tokenize(text);
        let classification = classify(&tokenized.tokens, &vocab);
        FileReport {
            filename: name.to_string(),
            tokenized,
            classification,
            snippets: IndexMap::new(),
        }
    }

    #[test]
    fn blank_submission_is_rejected() {
        let sub = Submission { user_input: "   ".into(), uploaded_files: vec![] };
        assert!(matches!(sub.validate(), Err(TaggerError::EmptySubmission)));
    }

    #[test]
    fn input_or_files_are_enough() {
        let typed = Submission { user_input: "hello".into(), ..Default::default() };
        assert!(typed.validate().is_ok());
        let uploaded = Submission {
            uploaded_files: vec![UploadedFile::new("a.txt", "")],
            ..Default::default()
        };
        assert!(uploaded.validate().is_ok());
    }

    #[test]
    fn submission_json_fields_are_optional() {
        let sub: Submission = serde_json::from_str(r#"{"uploaded_files":[{"name":"a.txt","content":"apple"}]}"#).unwrap();
        assert_eq!(sub.user_input, "");
        assert_eq!(sub.uploaded_files[0].name, "a.txt");
    }

    #[test]
    fn identities_are_stamped_on_every_record() {
        let resolver = MapResolver {
            texts: HashMap::from([("a.txt", 11)]),
            tags: HashMap::from([("fruit", 3), ("Unknown", 1)]),
        };
        let mut rep = report("a.txt", "apple pie\nred apple");
        assert_eq!(rep.tag(), &Topic::Known("fruit".into()));
        rep.resolve_identities(&resolver);
        assert!(rep.tokenized.records.iter().all(|r| r.text_id == 11 && r.tag_id == 3));

        let mut unknown = report("b.txt", "dog");
        unknown.resolve_identities(&resolver);
        assert!(unknown.tokenized.records.iter().all(|r| r.text_id == 0 && r.tag_id == 1));
    }
}
