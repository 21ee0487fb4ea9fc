use serde::{Deserialize, Serialize};

/// Characters that close a sentence or a clause
pub const CLAUSE_TERMINATORS: [char; 6] = ['.', ',', ';', ':', '!', '?'];

/// Whether snippets that end up empty are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnippetPolicy {
    /// drop snippets with no words
    #[default]
    SkipEmpty,
    /// keep them as a bare `"\n"`
    KeepEmpty,
}

/// Extracts short, punctuation-bounded neighborhoods of a token
#[derive(Debug, Clone, Copy, Default)]
pub struct SnippetExtractor {
    policy: SnippetPolicy,
}

impl SnippetExtractor {
    pub fn new(policy: SnippetPolicy) -> Self {
        Self { policy }
    }

    /// One snippet per line containing `token`, in line order
    ///
    /// Each snippet ends with `'\n'`.
    /// The window starts one word before the token and stops before the first
    /// word (counted from the line start) that carries a clause terminator.
    /// A token opening the line starts the window at the line start,
    /// a token closing the line yields the last three words.
    ///
    /// # Examples
    /// ```
    /// use tag_deriver::extract_snippets;
    /// let snippets = extract_snippets("apple", "I ate an apple today.\nNo fruit here.");
    /// assert_eq!(snippets, vec!["an apple\n"]);
    /// ```
    pub fn extract(&self, token: &str, document: &str) -> Vec<String> {
        if token.is_empty() {
            return Vec::new();
        }
        document.split('\n')
            .filter(|line| line.contains(token))
            .filter_map(|line| {
                let snippet = snippet_of_line(token, line);
                if snippet.is_empty() && self.policy == SnippetPolicy::SkipEmpty {
                    None
                } else {
                    Some(snippet + "\n")
                }
            })
            .collect()
    }
}

/// Words of the window, joined by single spaces (no trailing newline)
fn snippet_of_line(token: &str, line: &str) -> String {
    let words: Vec<&str> = line.split(' ').collect();
    let word_num = words.len();
    // 完全一致がなければ部分一致の語を起点にする
    let Some(token_idx) = words.iter().position(|w| *w == token)
        .or_else(|| words.iter().position(|w| w.contains(token)))
    else {
        return String::new();
    };
    let end = words.iter()
        .position(|w| w.contains(&CLAUSE_TERMINATORS[..]))
        .unwrap_or(word_num);

    let window: &[&str] = if token_idx == 0 {
        &words[..end]
    } else if token_idx == word_num - 1 {
        &words[word_num.saturating_sub(3)..]
    } else {
        let start = token_idx - 1;
        if start < end { &words[start..end] } else { &[] }
    };
    window.join(" ")
}

/// Extract snippets, dropping empty ones
pub fn extract_snippets(token: &str, document: &str) -> Vec<String> {
    SnippetExtractor::default().extract(token, document)
}

/// Positional lookup: the line at `line_index` (0-based) if it contains `token`
///
/// Callers that persisted token positions use this instead of re-scanning the
/// whole document. Out-of-range indices yield nothing.
pub fn grab_line(token: &str, line_index: usize, document: &str) -> Vec<String> {
    document.split('\n')
        .nth(line_index)
        .filter(|line| line.contains(token))
        .map(|line| vec![line.to_string()])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn stops_before_first_terminated_word() {
        let snippets = extract_snippets("apple", "I ate an apple today.\nNo fruit here.");
        assert_eq!(snippets, vec!["an apple\n"]);
    }

    #[test]
    fn absent_token_yields_nothing() {
        assert!(extract_snippets("pear", "I ate an apple today.").is_empty());
        assert!(extract_snippets("pear", "").is_empty());
    }

    #[test]
    fn token_opening_the_line() {
        let snippets = extract_snippets("Apples", "Apples are red, pears are green");
        assert_eq!(snippets, vec!["Apples are\n"]);
    }

    #[test]
    fn token_opening_a_line_without_punctuation() {
        assert_eq!(extract_snippets("Apples", "Apples are red"), vec!["Apples are red\n"]);
    }

    #[test]
    fn token_closing_the_line_takes_last_three_words() {
        let snippets = extract_snippets("apple", "yesterday, I really ate an apple");
        assert_eq!(snippets, vec!["ate an apple\n"]);
    }

    #[test]
    fn short_line_clamps_tail_window() {
        assert_eq!(extract_snippets("apple", "an apple"), vec!["an apple\n"]);
    }

    #[test]
    fn single_word_line() {
        // token is both first and last, first rule applies
        assert_eq!(extract_snippets("apple", "apple"), vec!["apple\n"]);
    }

    #[test]
    fn terminated_word_at_line_start_is_empty() {
        // "apple." is the first terminated word, window [0, 0)
        assert!(extract_snippets("apple.", "apple. is sweet").is_empty());
        assert!(extract_snippets("apple", "apple.").is_empty());
    }

    #[test]
    fn terminator_before_token_gives_empty_snippet() {
        let doc = "Well, I ate an apple today";
        assert!(extract_snippets("apple", doc).is_empty());
        let kept = SnippetExtractor::new(SnippetPolicy::KeepEmpty).extract("apple", doc);
        assert_eq!(kept, vec!["\n"]);
    }

    #[test]
    fn one_snippet_per_matching_line() {
        let doc = "the apple fell down.\nno fruit here\nmy apple tree grows fast";
        let snippets = extract_snippets("apple", doc);
        assert_eq!(snippets, vec!["the apple fell\n", "my apple tree grows fast\n"]);
    }

    #[test]
    fn substring_only_match_anchors_on_containing_word() {
        let snippets = extract_snippets("apple", "two green apples fell today.");
        assert_eq!(snippets, vec!["green apples fell\n"]);
    }

    #[test]
    fn empty_token_yields_nothing() {
        assert!(extract_snippets("", "anything goes here").is_empty());
    }

    #[test]
    fn grab_line_is_positional() {
        let doc = "first apple\nsecond pear\nthird apple";
        assert_eq!(grab_line("apple", 2, doc), vec!["third apple"]);
        assert!(grab_line("apple", 1, doc).is_empty());
        assert!(grab_line("apple", 9, doc).is_empty());
    }

    proptest! {
        #[test]
        fn never_panics_and_ends_with_newline(
            token in "[a-z.]{1,4}",
            doc in "[a-z .,;:!?\\n]{0,200}",
        ) {
            for policy in [SnippetPolicy::SkipEmpty, SnippetPolicy::KeepEmpty] {
                let snippets = SnippetExtractor::new(policy).extract(&token, &doc);
                let matching = doc.split('\n').filter(|l| l.contains(token.as_str())).count();
                prop_assert!(snippets.len() <= matching);
                for s in &snippets {
                    prop_assert!(s.ends_with('\n'));
                }
            }
        }
    }
}
