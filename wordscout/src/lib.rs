//! Literal pattern search over a corpus of text documents.
//!
//! Every query runs two independent algorithms, a brute-force scan and
//! Knuth-Morris-Pratt, over the same documents and reports each algorithm's
//! matches and elapsed time side by side.
//!
//! ```
//! use wordscout::{search_corpus, Corpus, ExecutionMode, Query};
//!
//! let corpus: Corpus = [("notes.txt", "foo\nbar\nfoobar")].into_iter().collect();
//! let query = Query::new("foo").unwrap();
//!
//! let report = search_corpus(&corpus, &query, ExecutionMode::Sequential).unwrap();
//! assert_eq!(report.kmp.total_matches(), 2);
//! assert!(report.algorithms_agree());
//! ```
pub mod config;
pub mod corpus;
pub mod errors;
pub mod filters;
pub mod loader;
pub mod metrics;
pub mod query;
pub mod results;
pub mod search;

pub use config::SearchConfig;
pub use corpus::{Corpus, Document};
pub use errors::{SearchError, SearchResult};
pub use query::Query;
pub use results::{MatchRecord, SearchOutcome, SearchReport};
pub use search::{
    run, search, search_corpus, Algorithm, ExecutionMode, Matcher, SearchSession, WordClassifier,
};
