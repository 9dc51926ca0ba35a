//! Search result types.
//!
//! Each algorithm run produces one [`SearchOutcome`]: the ordered list of
//! [`MatchRecord`]s across the whole corpus plus how long the run took. A query
//! always runs both algorithms, so the engine hands back a [`SearchReport`]
//! holding the two outcomes side by side for comparison.
//!
//! Records are owned values. They copy the document id and the matching line
//! out of the corpus, so a report stays valid after the corpus is dropped or
//! reloaded.
use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::search::matcher::Algorithm;

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Represents a single occurrence of the pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchRecord {
    /// Identifier of the document the match was found in
    pub document: String,
    /// 1-based line number
    pub line_number: usize,
    /// 0-based column of the match start, counted in characters
    pub column: usize,
    /// The full, unmodified text of the matching line
    pub line: String,
}

/// The result of running one algorithm over a corpus
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub algorithm: Algorithm,
    /// All matches, in corpus order, then line, then column
    pub matches: Vec<MatchRecord>,
    /// Wall-clock time of the run, measured with a monotonic clock
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// Creates an empty outcome
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            matches: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Number of distinct documents with at least one match
    pub fn documents_with_matches(&self) -> usize {
        self.by_document().len()
    }

    /// Groups matches by document, preserving corpus order
    pub fn by_document(&self) -> Vec<(&str, &[MatchRecord])> {
        let mut groups = Vec::new();
        let mut start = 0;
        for i in 1..=self.matches.len() {
            if i == self.matches.len() || self.matches[i].document != self.matches[start].document
            {
                groups.push((self.matches[start].document.as_str(), &self.matches[start..i]));
                start = i;
            }
        }
        groups
    }

    /// Matches found in one document
    pub fn matches_in<'a>(&'a self, document: &'a str) -> impl Iterator<Item = &'a MatchRecord> {
        self.matches.iter().filter(move |m| m.document == document)
    }
}

/// Both algorithm runs for a single query
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub naive: SearchOutcome,
    pub kmp: SearchOutcome,
}

impl SearchReport {
    pub fn outcome(&self, algorithm: Algorithm) -> &SearchOutcome {
        match algorithm {
            Algorithm::Naive => &self.naive,
            Algorithm::Kmp => &self.kmp,
        }
    }

    pub fn outcomes(&self) -> [&SearchOutcome; 2] {
        [&self.naive, &self.kmp]
    }

    /// True when neither algorithm found anything
    pub fn is_empty(&self) -> bool {
        self.naive.is_empty() && self.kmp.is_empty()
    }

    /// True when both algorithms produced the same records in the same order
    pub fn algorithms_agree(&self) -> bool {
        self.naive.matches == self.kmp.matches
    }
}
