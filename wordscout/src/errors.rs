//! Error types for wordscout.
//!
//! Every fallible operation returns a [`SearchResult`]. The matchers themselves
//! never fail: once a [`Query`](crate::Query) exists its pattern is non-empty, and
//! scanning any line with it is total. Errors therefore come from three places:
//!
//! 1. **Query construction** - an empty pattern is rejected up front
//!    ([`SearchError::InvalidQuery`]), before either matcher runs.
//! 2. **Loading documents** - missing or unreadable files surface as
//!    [`SearchError::FileNotFound`], [`SearchError::PermissionDenied`], or the
//!    underlying [`std::io::Error`].
//! 3. **Configuration** - bad config files or CLI combinations
//!    ([`SearchError::ConfigError`]).
//!
//! An empty corpus is not an error, and neither is a file that cannot be decoded
//! as UTF-8: the loader falls back to ISO-8859-1, which accepts every byte.
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while loading documents or running a search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Maps an I/O error on `path` to the most specific variant
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
