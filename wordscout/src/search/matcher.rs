use serde::{Deserialize, Serialize};
use std::fmt;

use super::boundary::WordClassifier;
use super::kmp::KmpMatcher;
use super::naive::NaiveMatcher;
use crate::query::Query;

/// The matching algorithms wordscout can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Brute-force scan testing every start position
    Naive,
    /// Knuth-Morris-Pratt scan driven by a failure table
    Kmp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Naive, Algorithm::Kmp];

    /// Human readable name used in reports
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Naive => "Brute Force",
            Algorithm::Kmp => "KMP",
        }
    }

    /// Prepares a matcher for `query`. Any per-pattern preprocessing happens here,
    /// once, and is reused for every line searched afterwards.
    pub fn build(self, query: &Query) -> Box<dyn Matcher> {
        match self {
            Algorithm::Naive => Box::new(NaiveMatcher::new(query)),
            Algorithm::Kmp => Box::new(KmpMatcher::new(query)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Finds every occurrence of a prepared pattern in a single line.
///
/// Implementations must report the character column of each match start in
/// ascending order, including overlapping occurrences, and must honor the
/// whole-word and case-sensitivity options of the query they were built from.
pub trait Matcher: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    fn search_line(&self, line: &str) -> Vec<usize>;
}

/// Lowers a character while keeping a one-to-one mapping between input and
/// output characters, so columns computed on folded text are valid on the
/// original. Characters whose lowercase form expands to several characters
/// (such as 'İ') are left unchanged. Final sigma folds to the medial form, so
/// "ΟΔΟΣ" and "οδος" compare equal.
pub fn fold_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some('ς'), None) => 'σ',
        (Some(single), None) => single,
        _ => ch,
    }
}

/// A query's pattern decoded into characters, with the options both matchers
/// need to interpret a line.
#[derive(Debug, Clone)]
pub struct PreparedPattern {
    chars: Vec<char>,
    whole_word: bool,
    case_sensitive: bool,
    word_chars: WordClassifier,
}

impl PreparedPattern {
    pub fn new(query: &Query) -> Self {
        let case_sensitive = query.case_sensitive();
        let chars = if case_sensitive {
            query.pattern().chars().collect()
        } else {
            query.pattern().chars().map(fold_char).collect()
        };
        Self {
            chars,
            whole_word: query.whole_word(),
            case_sensitive,
            word_chars: query.word_chars(),
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Decodes a line into the character form the matchers compare against.
    /// The caller's line is never modified.
    pub fn line_chars(&self, line: &str) -> Vec<char> {
        if self.case_sensitive {
            line.chars().collect()
        } else {
            line.chars().map(fold_char).collect()
        }
    }

    /// Final acceptance test for an exact match starting at `start`
    pub fn accepts(&self, line: &[char], start: usize) -> bool {
        !self.whole_word || self.word_chars.is_whole_word(line, start, self.chars.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_char() {
        assert_eq!(fold_char('A'), 'a');
        assert_eq!(fold_char('a'), 'a');
        assert_eq!(fold_char('É'), 'é');
        assert_eq!(fold_char('Σ'), 'σ');
        assert_eq!(fold_char('7'), '7');
        assert_eq!(fold_char('ς'), 'σ');
        // Expands to "i̇" under full lowercasing; kept as-is to preserve columns
        assert_eq!(fold_char('İ'), 'İ');
    }

    #[test]
    fn test_prepared_pattern_folds_when_case_insensitive() {
        let query = Query::new("CaT").unwrap();
        let pattern = PreparedPattern::new(&query);
        assert_eq!(pattern.chars(), &['c', 'a', 't']);
        assert_eq!(pattern.line_chars("A CAT"), vec!['a', ' ', 'c', 'a', 't']);

        let query = Query::new("CaT").unwrap().with_case_sensitive(true);
        let pattern = PreparedPattern::new(&query);
        assert_eq!(pattern.chars(), &['C', 'a', 'T']);
        assert_eq!(pattern.line_chars("A CAT"), vec!['A', ' ', 'C', 'A', 'T']);
    }

    #[test]
    fn test_line_chars_preserves_column_count() {
        let query = Query::new("x").unwrap();
        let pattern = PreparedPattern::new(&query);
        let line = "İstanbul ÇAĞ";
        assert_eq!(pattern.line_chars(line).len(), line.chars().count());
    }

    #[test]
    fn test_accepts_only_checks_boundaries_in_whole_word_mode() {
        let line: Vec<char> = "scatter".chars().collect();

        let substring = PreparedPattern::new(&Query::new("cat").unwrap());
        assert!(substring.accepts(&line, 1));

        let whole = PreparedPattern::new(&Query::new("cat").unwrap().with_whole_word(true));
        assert!(!whole.accepts(&line, 1));
    }

    #[test]
    fn test_final_sigma_matches_capital_sigma() {
        let insensitive = Query::new("ΟΔΟΣ").unwrap().with_whole_word(true);
        let sensitive = Query::new("ΟΔΟΣ").unwrap().with_case_sensitive(true);

        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.build(&insensitive).search_line("η οδος εδώ"), vec![2]);
            assert!(algorithm.build(&sensitive).search_line("η οδος εδώ").is_empty());
        }
    }

    #[test]
    fn test_algorithm_build_and_labels() {
        let query = Query::new("a").unwrap();
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.build(&query).algorithm(), algorithm);
        }
        assert_eq!(Algorithm::Naive.to_string(), "Brute Force");
        assert_eq!(Algorithm::Kmp.to_string(), "KMP");
    }
}
