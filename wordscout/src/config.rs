use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};
use crate::query::Query;
use crate::search::boundary::WordClassifier;
use crate::search::engine::ExecutionMode;

/// Configuration for a search run.
///
/// # Configuration Locations
///
/// Values are layered, later sources overriding earlier ones:
/// 1. Global `$CONFIG_DIR/wordscout/config.yaml`
/// 2. Local `.wordscout.yaml` in the current directory
/// 3. A file passed explicitly (the CLI's `--config` flag)
///
/// Command-line arguments are applied last through [`SearchConfig::merge_with_cli`].
///
/// # Configuration Format
///
/// ```yaml
/// # Literal text to find (no regex or wildcards)
/// pattern: "whale"
///
/// # Require non-word characters around each match
/// whole_word: true
///
/// # Match case exactly
/// case_sensitive: false
///
/// # Files or directories to load
/// paths:
///   - "books"
///   - "notes/todo.txt"
///
/// # Extensions picked up when walking directories
/// file_extensions: ["txt", "md"]
///
/// # Glob patterns to skip while walking directories
/// ignore_patterns:
///   - "archive/**"
///
/// # Word characters for whole-word mode (unicode|ascii)
/// word_chars: unicode
///
/// # Run the two algorithms one after the other or at the same time
/// execution: sequential
///
/// # Reader threads used while loading files (default: CPU cores)
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// The literal search pattern
    #[serde(default)]
    pub pattern: String,

    /// Only report matches surrounded by non-word characters or line edges
    #[serde(default)]
    pub whole_word: bool,

    /// Compare characters exactly instead of after lowering
    #[serde(default)]
    pub case_sensitive: bool,

    /// Files and directories to search
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Extensions accepted during directory walks. `None` accepts everything.
    /// Files named directly in `paths` are always loaded.
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Option<Vec<String>>,

    /// Glob patterns for files to skip during directory walks
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Classifier deciding what counts as a word character
    #[serde(default)]
    pub word_chars: WordClassifier,

    /// How the two algorithm runs are scheduled
    #[serde(default)]
    pub execution: ExecutionMode,

    /// Only report counts and timings instead of individual matches
    #[serde(default)]
    pub stats_only: bool,

    /// Number of threads used to read files
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_file_extensions() -> Option<Vec<String>> {
    Some(vec!["txt".to_string()])
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            whole_word: false,
            case_sensitive: false,
            paths: Vec::new(),
            file_extensions: default_file_extensions(),
            ignore_patterns: Vec::new(),
            word_chars: WordClassifier::default(),
            execution: ExecutionMode::default(),
            stats_only: false,
            thread_count: default_thread_count(),
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus an explicit file
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(SearchError::file_not_found(path));
            }
        }

        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("wordscout/config.yaml")),
            Some(PathBuf::from(".wordscout.yaml")),
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values.
    /// CLI values win whenever they differ from the defaults.
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        if !cli_config.pattern.is_empty() {
            self.pattern = cli_config.pattern;
        }
        if cli_config.whole_word {
            self.whole_word = true;
        }
        if cli_config.case_sensitive {
            self.case_sensitive = true;
        }
        if !cli_config.paths.is_empty() {
            self.paths = cli_config.paths;
        }
        if cli_config.file_extensions != default_file_extensions() {
            self.file_extensions = cli_config.file_extensions;
        }
        if !cli_config.ignore_patterns.is_empty() {
            self.ignore_patterns = cli_config.ignore_patterns;
        }
        if cli_config.word_chars != WordClassifier::default() {
            self.word_chars = cli_config.word_chars;
        }
        if cli_config.execution != ExecutionMode::default() {
            self.execution = cli_config.execution;
        }
        if cli_config.stats_only {
            self.stats_only = true;
        }
        if cli_config.thread_count != default_thread_count() {
            self.thread_count = cli_config.thread_count;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }

    /// Builds the validated query described by this configuration
    pub fn query(&self) -> SearchResult<Query> {
        Ok(Query::new(self.pattern.as_str())?
            .with_whole_word(self.whole_word)
            .with_case_sensitive(self.case_sensitive)
            .with_word_chars(self.word_chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let config_content = r#"
            pattern: "whale"
            whole_word: true
            case_sensitive: true
            paths: ["books", "notes/todo.txt"]
            file_extensions: ["txt", "md"]
            ignore_patterns: ["archive/**"]
            word_chars: ascii
            execution: concurrent
            stats_only: true
            thread_count: 4
            log_level: "debug"
        "#;

        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = SearchConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.pattern, "whale");
        assert!(config.whole_word);
        assert!(config.case_sensitive);
        assert_eq!(
            config.paths,
            vec![PathBuf::from("books"), PathBuf::from("notes/todo.txt")]
        );
        assert_eq!(
            config.file_extensions,
            Some(vec!["txt".to_string(), "md".to_string()])
        );
        assert_eq!(config.ignore_patterns, vec!["archive/**".to_string()]);
        assert_eq!(config.word_chars, WordClassifier::Ascii);
        assert_eq!(config.execution, ExecutionMode::Concurrent);
        assert!(config.stats_only);
        assert_eq!(config.thread_count, NonZeroUsize::new(4).unwrap());
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_default_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(b"pattern: \"cat\"\n").unwrap();

        let config = SearchConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.pattern, "cat");
        assert!(!config.whole_word);
        assert!(!config.case_sensitive);
        assert_eq!(config.file_extensions, Some(vec!["txt".to_string()]));
        assert_eq!(config.word_chars, WordClassifier::Unicode);
        assert_eq!(config.execution, ExecutionMode::Sequential);
        assert_eq!(
            config.thread_count,
            NonZeroUsize::new(num_cpus::get()).unwrap()
        );
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_merge_with_cli() {
        let file_config = SearchConfig {
            pattern: "whale".to_string(),
            paths: vec![PathBuf::from("books")],
            file_extensions: Some(vec!["md".to_string()]),
            ignore_patterns: vec!["archive/**".to_string()],
            log_level: "info".to_string(),
            ..SearchConfig::default()
        };

        let cli_config = SearchConfig {
            pattern: "Ahab".to_string(),
            case_sensitive: true,
            paths: vec![PathBuf::from("moby.txt")],
            execution: ExecutionMode::Concurrent,
            ..SearchConfig::default()
        };

        let merged = file_config.merge_with_cli(cli_config);
        assert_eq!(merged.pattern, "Ahab"); // CLI value
        assert!(merged.case_sensitive); // CLI value
        assert!(!merged.whole_word); // neither set it
        assert_eq!(merged.paths, vec![PathBuf::from("moby.txt")]); // CLI value
        assert_eq!(merged.file_extensions, Some(vec!["md".to_string()])); // File value
        assert_eq!(merged.ignore_patterns, vec!["archive/**".to_string()]); // File value
        assert_eq!(merged.execution, ExecutionMode::Concurrent); // CLI value
        assert_eq!(merged.log_level, "info"); // File value
    }

    #[test]
    fn test_query_from_config() {
        let config = SearchConfig {
            pattern: "Cat".to_string(),
            whole_word: true,
            word_chars: WordClassifier::Ascii,
            ..SearchConfig::default()
        };
        let query = config.query().unwrap();
        assert_eq!(query.pattern(), "Cat");
        assert!(query.whole_word());
        assert!(!query.case_sensitive());
        assert_eq!(query.word_chars(), WordClassifier::Ascii);

        let empty = SearchConfig::default();
        assert!(matches!(empty.query(), Err(SearchError::InvalidQuery(_))));
    }

    #[test]
    fn test_invalid_config() {
        let config_content = r#"
            whole_word: "sometimes"
            thread_count: "invalid"
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let result = SearchConfig::load_from(Some(&config_path));
        assert!(matches!(result, Err(SearchError::ConfigError(_))));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = SearchConfig::load_from(Some(Path::new("nonexistent.yaml")));
        assert!(matches!(result, Err(SearchError::FileNotFound(_))));
    }
}
