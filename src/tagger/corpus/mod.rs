use indexmap::{IndexMap, IndexSet};

/// Root token → tag associations harvested from previously classified documents
///
/// - a token maps to exactly one tag, the last pair inserted for it wins
/// - `tags` keeps every tag ever inserted in first-seen order,
///   including tags whose pairs were later superseded
///
/// The tag order is what breaks ties between equally voted topics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    token_tags: IndexMap<String, String>,
    tags: IndexSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(token, tag)` pairs as returned by the root token table
    pub fn from_pairs<I, T, G>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, G)>,
        T: Into<String>,
        G: Into<String>,
    {
        let mut vocab = Self::new();
        for (token, tag) in pairs {
            vocab.insert(token, tag);
        }
        vocab
    }

    /// Build from an explicit tag order followed by `(token, tag)` pairs
    ///
    /// Tags are registered first, so their order (the tie-break order) is the
    /// one given here. Tags only named by pairs are appended after them.
    pub fn from_tags_and_pairs<J, S, I, T, G>(tags: J, pairs: I) -> Self
    where
        J: IntoIterator<Item = S>,
        S: Into<String>,
        I: IntoIterator<Item = (T, G)>,
        T: Into<String>,
        G: Into<String>,
    {
        let mut vocab = Self::new();
        for tag in tags {
            vocab.add_tag(tag);
        }
        for (token, tag) in pairs {
            vocab.insert(token, tag);
        }
        vocab
    }

    /// Register a tag without any token
    ///
    /// # Returns
    /// * `bool` - true if the tag was not known yet
    pub fn add_tag<G: Into<String>>(&mut self, tag: G) -> bool {
        self.tags.insert(tag.into())
    }

    /// Insert a pair, replacing any previous tag of the token
    ///
    /// # Returns
    /// * `Option<String>` - the replaced tag
    pub fn insert<T: Into<String>, G: Into<String>>(&mut self, token: T, tag: G) -> Option<String> {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.insert(tag.clone());
        }
        self.token_tags.insert(token.into(), tag)
    }

    #[inline]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.token_tags.get(token).map(|t| t.as_str())
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_tags.contains_key(token)
    }

    /// All known tags in first-seen order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.as_str())
    }

    pub fn tag_num(&self) -> usize {
        self.tags.len()
    }

    /// Surviving `(token, tag)` pairs in insertion order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.token_tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// First `n` pairs, for diagnostics
    pub fn sample(&self, n: usize) -> Vec<(&str, &str)> {
        self.pairs().take(n).collect()
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.token_tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_tags.is_empty()
    }
}

impl<T, G> FromIterator<(T, G)> for Vocabulary
where
    T: Into<String>,
    G: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, G)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_pair_wins_for_duplicate_tokens() {
        let vocab = Vocabulary::from_pairs([("apple", "fruit"), ("apple", "company")]);
        assert_eq!(vocab.get("apple"), Some("company"));
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn superseded_tags_stay_known() {
        let vocab = Vocabulary::from_pairs([("apple", "fruit"), ("apple", "company")]);
        assert_eq!(vocab.tags().collect::<Vec<_>>(), vec!["fruit", "company"]);
    }

    #[test]
    fn tags_keep_first_seen_order() {
        let vocab: Vocabulary = [("car", "vehicle"), ("apple", "fruit"), ("bus", "vehicle")]
            .into_iter()
            .collect();
        assert_eq!(vocab.tags().collect::<Vec<_>>(), vec!["vehicle", "fruit"]);
        assert_eq!(vocab.tag_num(), 2);
    }

    #[test]
    fn explicit_tag_order_comes_first() {
        let vocab = Vocabulary::from_tags_and_pairs(
            ["fruit", "vehicle"],
            [("car", "vehicle"), ("apple", "company")],
        );
        assert_eq!(vocab.tags().collect::<Vec<_>>(), vec!["fruit", "vehicle", "company"]);
        assert_eq!(vocab.len(), 2);

        let mut vocab = vocab;
        assert!(!vocab.add_tag("fruit"));
        assert!(vocab.add_tag("nature"));
        assert_eq!(vocab.tag_num(), 4);
    }

    #[test]
    fn sample_is_bounded() {
        let vocab = Vocabulary::from_pairs([("a1", "x"), ("a2", "x"), ("a3", "y")]);
        assert_eq!(vocab.sample(2), vec![("a1", "x"), ("a2", "x")]);
        assert_eq!(vocab.sample(10).len(), 3);
    }

    #[test]
    fn insert_reports_replaced_tag() {
        let mut vocab = Vocabulary::new();
        assert_eq!(vocab.insert("apple", "fruit"), None);
        assert_eq!(vocab.insert("apple", "company"), Some("fruit".to_string()));
        assert!(vocab.contains_token("apple"));
        assert!(!vocab.is_empty());
    }
}
