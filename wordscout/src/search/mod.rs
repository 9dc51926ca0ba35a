//! The matching engine.
//!
//! Both algorithms implement [`Matcher`], a single `search_line` operation over
//! one line of text. The [`engine`] applies a matcher to every line of every
//! document in a corpus and times the pass:
//!
//! - [`naive`]: tries the pattern at every position, O(line * pattern)
//! - [`kmp`]: precomputes a failure table once per query, O(line) per line
//!
//! Both report overlapping matches, honor whole-word mode through the
//! [`boundary`] classifier, and return character (not byte) columns, so for any
//! query and corpus their ordered results are identical.
pub mod boundary;
pub mod engine;
pub mod kmp;
pub mod matcher;
pub mod naive;

pub use boundary::WordClassifier;
pub use engine::{run, search, search_corpus, ExecutionMode, SearchSession};
pub use matcher::{Algorithm, Matcher};
