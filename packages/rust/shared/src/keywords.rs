//! Keyword relevance policy.
//!
//! A listing matches when any whitespace-delimited token of its title
//! case-insensitively equals a keyword. This is whole-token equality, not
//! substring containment: "Internal Tools Engineer" does not match the
//! keyword "Intern".

/// An ordered set of case-insensitive match tokens, lowercased once at
/// construction and shared read-only across all concurrent units.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Build a set from raw keywords, normalizing each to lowercase.
    pub fn new(keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// True iff some whitespace-delimited token of `title` equals some
    /// keyword, ignoring case. An empty set never matches.
    pub fn matches(&self, title: &str) -> bool {
        title
            .split_whitespace()
            .any(|token| self.keywords.iter().any(|k| token.to_lowercase() == *k))
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}
