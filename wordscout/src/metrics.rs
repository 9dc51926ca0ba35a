use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Counters shared between the loader and the search engine.
///
/// Cloning is cheap and every clone feeds the same counters, so the loader's
/// worker threads and both algorithm runs can record into one instance.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    // Loading
    files_loaded: Arc<AtomicU64>,
    files_skipped: Arc<AtomicU64>,
    latin1_fallbacks: Arc<AtomicU64>,
    bytes_read: Arc<AtomicU64>,
    mmap_files: Arc<AtomicU64>,

    // Searching
    documents_searched: Arc<AtomicU64>,
    lines_scanned: Arc<AtomicU64>,
    matches_recorded: Arc<AtomicU64>,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self {
            files_loaded: Arc::new(AtomicU64::new(0)),
            files_skipped: Arc::new(AtomicU64::new(0)),
            latin1_fallbacks: Arc::new(AtomicU64::new(0)),
            bytes_read: Arc::new(AtomicU64::new(0)),
            mmap_files: Arc::new(AtomicU64::new(0)),
            documents_searched: Arc::new(AtomicU64::new(0)),
            lines_scanned: Arc::new(AtomicU64::new(0)),
            matches_recorded: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a file read from disk
    pub fn record_file_read(&self, bytes: u64, mapped: bool) {
        let total = self.bytes_read.fetch_add(bytes, Ordering::Relaxed) + bytes;
        if mapped {
            self.mmap_files.fetch_add(1, Ordering::Relaxed);
        }
        debug!("Read {} bytes, total read: {} bytes", bytes, total);
    }

    pub fn record_file_loaded(&self) {
        self.files_loaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file_skipped(&self) {
        self.files_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_latin1_fallback(&self) {
        self.latin1_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one document scanned by one algorithm
    pub fn record_document(&self, lines: u64, matches: u64) {
        self.documents_searched.fetch_add(1, Ordering::Relaxed);
        self.lines_scanned.fetch_add(lines, Ordering::Relaxed);
        self.matches_recorded.fetch_add(matches, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            files_loaded: self.files_loaded.load(Ordering::Relaxed),
            files_skipped: self.files_skipped.load(Ordering::Relaxed),
            latin1_fallbacks: self.latin1_fallbacks.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            mmap_files: self.mmap_files.load(Ordering::Relaxed),
            documents_searched: self.documents_searched.load(Ordering::Relaxed),
            lines_scanned: self.lines_scanned.load(Ordering::Relaxed),
            matches_recorded: self.matches_recorded.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Search stats:\n\
             Files loaded/skipped: {}/{}\n\
             Latin-1 fallbacks: {}\n\
             Bytes read: {} ({} memory mapped files)\n\
             Documents searched: {}\n\
             Lines scanned: {}\n\
             Matches recorded: {}",
            stats.files_loaded,
            stats.files_skipped,
            stats.latin1_fallbacks,
            stats.bytes_read,
            stats.mmap_files,
            stats.documents_searched,
            stats.lines_scanned,
            stats.matches_recorded
        );
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub files_loaded: u64,
    pub files_skipped: u64,
    pub latin1_fallbacks: u64,
    pub bytes_read: u64,
    pub mmap_files: u64,
    pub documents_searched: u64,
    pub lines_scanned: u64,
    pub matches_recorded: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_tracking() {
        let metrics = SearchMetrics::new();

        metrics.record_file_read(1000, false);
        metrics.record_file_read(20_000_000, true);
        metrics.record_file_loaded();
        metrics.record_file_loaded();
        metrics.record_file_skipped();
        metrics.record_latin1_fallback();

        let stats = metrics.get_stats();
        assert_eq!(stats.bytes_read, 20_001_000);
        assert_eq!(stats.mmap_files, 1);
        assert_eq!(stats.files_loaded, 2);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(stats.latin1_fallbacks, 1);
    }

    #[test]
    fn test_document_tracking() {
        let metrics = SearchMetrics::new();
        metrics.record_document(10, 2);
        metrics.record_document(5, 0);

        let stats = metrics.get_stats();
        assert_eq!(stats.documents_searched, 2);
        assert_eq!(stats.lines_scanned, 15);
        assert_eq!(stats.matches_recorded, 2);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = SearchMetrics::new();
        let clone = metrics.clone();
        clone.record_document(3, 1);
        assert_eq!(metrics.get_stats().lines_scanned, 3);
    }
}
