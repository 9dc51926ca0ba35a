use serde::Serialize;

use crate::errors::{SearchError, SearchResult};
use crate::search::boundary::WordClassifier;

/// A validated search request.
///
/// The pattern is guaranteed non-empty: [`Query::new`] is the only way to build
/// one, so the matchers never see an empty pattern. The builder methods take
/// `self` by value, so a query is never changed once it has been handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pattern: String,
    whole_word: bool,
    case_sensitive: bool,
    word_chars: WordClassifier,
}

impl Query {
    /// Creates a case-insensitive, substring query
    pub fn new(pattern: impl Into<String>) -> SearchResult<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(SearchError::invalid_query("search pattern must not be empty"));
        }
        Ok(Self {
            pattern,
            whole_word: false,
            case_sensitive: false,
            word_chars: WordClassifier::default(),
        })
    }

    pub fn with_whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_word_chars(mut self, word_chars: WordClassifier) -> Self {
        self.word_chars = word_chars;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Pattern length in characters
    pub fn len(&self) -> usize {
        self.pattern.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    pub fn whole_word(&self) -> bool {
        self.whole_word
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn word_chars(&self) -> WordClassifier {
        self.word_chars
    }
}
