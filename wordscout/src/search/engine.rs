use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, trace};

use super::matcher::{Algorithm, Matcher};
use crate::config::SearchConfig;
use crate::corpus::Corpus;
use crate::errors::{SearchError, SearchResult};
use crate::loader::{load_corpus, SkippedFile};
use crate::metrics::SearchMetrics;
use crate::query::Query;
use crate::results::{MatchRecord, SearchOutcome, SearchReport};

/// How the two algorithm runs of a query are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Naive first, then KMP, on the calling thread. Timings are directly comparable.
    #[default]
    Sequential,
    /// Both runs at once on the rayon pool
    Concurrent,
}

/// Applies a prepared matcher to every line of every document.
///
/// Records come out in corpus order, then line order, then column order.
pub fn scan_corpus<M: Matcher + ?Sized>(
    matcher: &M,
    corpus: &Corpus,
    metrics: &SearchMetrics,
) -> Vec<MatchRecord> {
    let mut records = Vec::new();

    for document in corpus {
        let before = records.len();
        let mut lines = 0u64;

        for (index, line) in document.lines().enumerate() {
            lines += 1;
            for column in matcher.search_line(line) {
                trace!("{}:{}:{} {}", document.id(), index + 1, column, line);
                records.push(MatchRecord {
                    document: document.id().to_string(),
                    line_number: index + 1,
                    column,
                    line: line.to_string(),
                });
            }
        }

        let found = records.len() - before;
        debug!(
            "{}: {} matches in {} lines of {}",
            matcher.algorithm(),
            found,
            lines,
            document.id()
        );
        metrics.record_document(lines, found as u64);
    }

    records
}

/// Runs one algorithm over the corpus and times it.
///
/// The clock covers building the matcher (the KMP failure table) and the full
/// scan. An empty pattern is rejected before anything runs.
pub fn run(algorithm: Algorithm, corpus: &Corpus, query: &Query) -> SearchResult<SearchOutcome> {
    run_with_metrics(algorithm, corpus, query, &SearchMetrics::new())
}

pub fn run_with_metrics(
    algorithm: Algorithm,
    corpus: &Corpus,
    query: &Query,
    metrics: &SearchMetrics,
) -> SearchResult<SearchOutcome> {
    if query.is_empty() {
        return Err(SearchError::invalid_query("search pattern must not be empty"));
    }

    let started = Instant::now();
    let matcher = algorithm.build(query);
    let matches = scan_corpus(matcher.as_ref(), corpus, metrics);
    let elapsed = started.elapsed();

    debug!(
        "{} finished: {} matches in {:.6}s",
        algorithm,
        matches.len(),
        elapsed.as_secs_f64()
    );

    Ok(SearchOutcome {
        algorithm,
        matches,
        elapsed,
    })
}

/// Runs both algorithms for one query over an in-memory corpus
pub fn search_corpus(
    corpus: &Corpus,
    query: &Query,
    execution: ExecutionMode,
) -> SearchResult<SearchReport> {
    search_corpus_with_metrics(corpus, query, execution, &SearchMetrics::new())
}

pub fn search_corpus_with_metrics(
    corpus: &Corpus,
    query: &Query,
    execution: ExecutionMode,
    metrics: &SearchMetrics,
) -> SearchResult<SearchReport> {
    info!(
        "Searching {} documents for {:?} (whole word: {}, case sensitive: {})",
        corpus.len(),
        query.pattern(),
        query.whole_word(),
        query.case_sensitive()
    );

    let (naive, kmp) = match execution {
        ExecutionMode::Sequential => (
            run_with_metrics(Algorithm::Naive, corpus, query, metrics),
            run_with_metrics(Algorithm::Kmp, corpus, query, metrics),
        ),
        ExecutionMode::Concurrent => rayon::join(
            || run_with_metrics(Algorithm::Naive, corpus, query, metrics),
            || run_with_metrics(Algorithm::Kmp, corpus, query, metrics),
        ),
    };
    let report = SearchReport {
        naive: naive?,
        kmp: kmp?,
    };

    info!(
        "Search complete. Brute force: {} matches in {:.6}s, KMP: {} matches in {:.6}s",
        report.naive.total_matches(),
        report.naive.elapsed_secs(),
        report.kmp.total_matches(),
        report.kmp.elapsed_secs()
    );

    Ok(report)
}

/// Everything a front end needs after a search driven by configuration
#[derive(Debug, Clone, Serialize)]
pub struct SearchSession {
    /// Number of documents that were searched
    pub documents: usize,
    /// Files left out of the corpus, with the reason
    pub skipped: Vec<SkippedFile>,
    pub report: SearchReport,
}

/// Loads the configured files and runs both algorithms over them.
///
/// The query is validated before any file is read.
pub fn search(config: &SearchConfig) -> SearchResult<SearchSession> {
    let query = config.query()?;
    let metrics = SearchMetrics::new();

    let loaded = load_corpus(config, &metrics)?;
    let report = search_corpus_with_metrics(&loaded.corpus, &query, config.execution, &metrics)?;

    metrics.log_stats();

    Ok(SearchSession {
        documents: loaded.corpus.len(),
        skipped: loaded.skipped,
        report,
    })
}
