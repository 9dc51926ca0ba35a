use ignore::WalkBuilder;
use memmap2::Mmap;
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

use crate::config::SearchConfig;
use crate::corpus::Corpus;
use crate::errors::{SearchError, SearchResult};
use crate::filters::should_include_file;
use crate::metrics::SearchMetrics;

const BUFFER_CAPACITY: usize = 65536;
const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Why a file was left out of the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Nothing but whitespace after decoding
    Empty,
}

/// A file the loader read but did not add to the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Output of [`load_corpus`]
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub corpus: Corpus,
    pub skipped: Vec<SkippedFile>,
}

/// Decodes file bytes: UTF-8 when valid, otherwise ISO-8859-1.
///
/// The fallback maps every byte to the code point of the same value, so it
/// cannot fail.
pub fn decode_bytes(bytes: &[u8], path: &Path, metrics: &SearchMetrics) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(e) => {
            warn!(
                "{} is not valid UTF-8 ({}), decoding as ISO-8859-1",
                path.display(),
                e
            );
            metrics.record_latin1_fallback();
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}

/// Reads and decodes one file. Large files are memory mapped, the rest are
/// read through a buffer.
pub fn read_document(path: &Path, metrics: &SearchMetrics) -> SearchResult<String> {
    trace!("Reading file: {}", path.display());
    let file = File::open(path).map_err(|e| SearchError::from_io(e, path))?;
    let size = file.metadata().map(|m| m.len()).unwrap_or(0);

    if size >= LARGE_FILE_THRESHOLD {
        let mmap = unsafe { Mmap::map(&file) }.map_err(SearchError::IoError)?;
        metrics.record_file_read(size, true);
        return Ok(decode_bytes(&mmap, path, metrics));
    }

    let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
    let mut bytes = Vec::with_capacity(size as usize);
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| SearchError::from_io(e, path))?;
    metrics.record_file_read(bytes.len() as u64, false);
    Ok(decode_bytes(&bytes, path, metrics))
}

/// Expands the configured paths into the list of files to load.
///
/// Files are kept as given. Directories are walked (hidden entries and
/// gitignored files skipped) and filtered by extension and ignore patterns;
/// each directory's files are sorted so the corpus order is reproducible.
pub fn collect_files(config: &SearchConfig) -> SearchResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in &config.paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut walker = WalkBuilder::new(path);
            walker.hidden(true).git_ignore(true).require_git(false);

            let mut found: Vec<PathBuf> = walker
                .build()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
                .map(|entry| entry.into_path())
                .filter(|p| {
                    // Ignore globs are written relative to the walked directory
                    should_include_file(
                        p.strip_prefix(path).unwrap_or(p.as_path()),
                        config.file_extensions.as_deref(),
                        &config.ignore_patterns,
                    )
                })
                .collect();
            found.sort();
            debug!("Found {} files under {}", found.len(), path.display());
            files.extend(found);
        } else {
            return Err(SearchError::file_not_found(path));
        }
    }

    Ok(files)
}

/// Loads every configured file into a corpus.
///
/// Files are read in parallel on a pool of `thread_count` threads; the corpus
/// keeps the order of [`collect_files`]. Whitespace-only files are reported in
/// [`LoadReport::skipped`] instead of being loaded.
pub fn load_corpus(config: &SearchConfig, metrics: &SearchMetrics) -> SearchResult<LoadReport> {
    if config.paths.is_empty() {
        return Err(SearchError::config_error("no files to search"));
    }

    let files = collect_files(config)?;
    info!("Loading {} files", files.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count.get())
        .build()
        .map_err(|e| SearchError::config_error(format!("failed to start reader threads: {e}")))?;

    let texts: Vec<String> = pool.install(|| {
        files
            .par_iter()
            .map(|path| read_document(path, metrics))
            .collect::<SearchResult<Vec<_>>>()
    })?;

    let mut report = LoadReport::default();
    for (path, text) in files.into_iter().zip(texts) {
        if text.trim().is_empty() {
            warn!("Skipping empty file: {}", path.display());
            metrics.record_file_skipped();
            report.skipped.push(SkippedFile {
                path,
                reason: SkipReason::Empty,
            });
            continue;
        }

        let id = path.display().to_string();
        if report.corpus.insert(id, text).is_some() {
            debug!("Replaced earlier copy of {}", path.display());
        } else {
            metrics.record_file_loaded();
        }
    }

    info!(
        "Loaded {} documents ({} skipped)",
        report.corpus.len(),
        report.skipped.len()
    );
    Ok(report)
}
