use super::matcher::{Algorithm, Matcher, PreparedPattern};
use crate::query::Query;

/// Brute-force matcher: tries the pattern at every start position of the line.
///
/// Runs in O(line * pattern) time in the worst case. It never skips ahead after
/// a hit, so overlapping occurrences are all reported.
#[derive(Debug, Clone)]
pub struct NaiveMatcher {
    pattern: PreparedPattern,
}

impl NaiveMatcher {
    pub fn new(query: &Query) -> Self {
        Self {
            pattern: PreparedPattern::new(query),
        }
    }

    /// Scans already-prepared line characters
    pub fn find_in(&self, line: &[char]) -> Vec<usize> {
        let pattern = self.pattern.chars();
        let m = pattern.len();
        if m == 0 || m > line.len() {
            return Vec::new();
        }

        let mut starts = Vec::new();
        for start in 0..=line.len() - m {
            let window = &line[start..start + m];
            let exact = window.iter().zip(pattern).all(|(a, b)| a == b);
            if exact && self.pattern.accepts(line, start) {
                starts.push(start);
            }
        }
        starts
    }
}

impl Matcher for NaiveMatcher {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Naive
    }

    fn search_line(&self, line: &str) -> Vec<usize> {
        self.find_in(&self.pattern.line_chars(line))
    }
}
