use super::matcher::{Algorithm, Matcher, PreparedPattern};
use crate::query::Query;

/// Builds the KMP failure table for `pattern`.
///
/// `lps[i]` is the length of the longest proper prefix of `pattern[..=i]` that is
/// also a suffix of it. An empty pattern yields an empty table.
pub fn failure_table(pattern: &[char]) -> Vec<usize> {
    let mut lps = vec![0; pattern.len()];
    let mut len = 0;
    let mut i = 1;

    while i < pattern.len() {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len > 0 {
            len = lps[len - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }
    lps
}

/// Knuth-Morris-Pratt matcher.
///
/// The failure table is computed once when the matcher is built and then reused
/// for every line. Each line is scanned in O(line) time: the line cursor never
/// moves backwards, and after a full match the pattern cursor falls back through
/// the table so overlapping occurrences are still found.
#[derive(Debug, Clone)]
pub struct KmpMatcher {
    pattern: PreparedPattern,
    lps: Vec<usize>,
}

impl KmpMatcher {
    pub fn new(query: &Query) -> Self {
        let pattern = PreparedPattern::new(query);
        let lps = failure_table(pattern.chars());
        Self { pattern, lps }
    }

    pub fn lps(&self) -> &[usize] {
        &self.lps
    }

    /// Scans already-prepared line characters
    pub fn find_in(&self, line: &[char]) -> Vec<usize> {
        let pattern = self.pattern.chars();
        let m = pattern.len();
        if m == 0 {
            return Vec::new();
        }

        let mut starts = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < line.len() {
            if line[i] == pattern[j] {
                i += 1;
                j += 1;
                if j == m {
                    let start = i - m;
                    if self.pattern.accepts(line, start) {
                        starts.push(start);
                    }
                    j = self.lps[j - 1];
                }
            } else if j > 0 {
                j = self.lps[j - 1];
            } else {
                i += 1;
            }
        }
        starts
    }
}

impl Matcher for KmpMatcher {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Kmp
    }

    fn search_line(&self, line: &str) -> Vec<usize> {
        self.find_in(&self.pattern.line_chars(line))
    }
}
