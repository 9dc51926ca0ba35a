use clap::{Parser, Subcommand};
use colored::Colorize;
use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wordscout::{
    loader::SkippedFile, search, Algorithm, ExecutionMode, SearchConfig, SearchError,
    SearchOutcome, SearchSession, WordClassifier,
};

type Result<T> = std::result::Result<T, SearchError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CliSearchConfig {
    /// Literal text to search for
    #[arg(short = 'p', long = "pattern")]
    pattern: Option<String>,

    /// Files or directories to search
    paths: Vec<PathBuf>,

    /// Match whole words only
    #[arg(short = 'w', long = "whole-word")]
    whole_word: bool,

    /// Match case exactly
    #[arg(short = 'c', long = "case-sensitive")]
    case_sensitive: bool,

    /// File extensions to include when walking directories (e.g. txt,md)
    #[arg(short = 'e', long)]
    extensions: Option<String>,

    /// Patterns to ignore (glob format)
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Characters that form words in whole-word mode (unicode|ascii)
    #[arg(long, default_value = "unicode")]
    word_chars: WordClassifier,

    /// Run both algorithms at the same time instead of one after the other
    #[arg(long)]
    concurrent: bool,

    /// Show only counts and timings, not matches
    #[arg(short, long)]
    stats: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Number of threads used to read files
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Configuration file layered over the global and local ones
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search text files with both the brute force and KMP matchers
    Search(Box<CliSearchConfig>),
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => {
            // An explicit `-p ""` must not fall back to a configured pattern
            if args.pattern.as_deref() == Some("") {
                return Err(SearchError::invalid_query("Please enter a search term."));
            }

            let file_config = SearchConfig::load_from(args.config.as_deref())?;
            let defaults = SearchConfig::default();

            let file_extensions = match &args.extensions {
                Some(e) => Some(
                    e.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>(),
                ),
                None => defaults.file_extensions.clone(),
            };

            let cli_config = SearchConfig {
                pattern: args.pattern.clone().unwrap_or_default(),
                whole_word: args.whole_word,
                case_sensitive: args.case_sensitive,
                paths: args.paths.clone(),
                file_extensions,
                ignore_patterns: args.ignore.clone(),
                word_chars: args.word_chars,
                execution: if args.concurrent {
                    ExecutionMode::Concurrent
                } else {
                    ExecutionMode::Sequential
                },
                stats_only: args.stats,
                thread_count: args.threads.unwrap_or(defaults.thread_count),
                log_level: args
                    .log_level
                    .clone()
                    .unwrap_or_else(|| defaults.log_level.clone()),
            };

            let config = file_config.merge_with_cli(cli_config);
            init_logging(&config.log_level);
            debug!("Effective configuration: {:?}", config);

            if config.pattern.is_empty() {
                return Err(SearchError::invalid_query("Please enter a search term."));
            }
            if config.paths.is_empty() {
                return Err(SearchError::config_error("Please load files to search."));
            }

            let session = search(&config)?;
            print_skipped(&session.skipped);

            if args.json {
                let json = serde_json::to_string_pretty(&session).map_err(std::io::Error::from)?;
                println!("{json}");
            } else {
                print_search_results(&session, config.stats_only);
            }
            Ok(())
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_skipped(skipped: &[SkippedFile]) {
    for file in skipped {
        eprintln!(
            "{} skipping empty file {}",
            "warning:".yellow(),
            file.path.display()
        );
    }
}

fn print_search_results(session: &SearchSession, stats_only: bool) {
    let report = &session.report;

    if stats_only {
        for outcome in report.outcomes() {
            println!(
                "{}: {} matches in {} of {} files ({:.6} seconds)",
                outcome.algorithm.label(),
                outcome.total_matches(),
                outcome.documents_with_matches(),
                session.documents,
                outcome.elapsed_secs()
            );
        }
        return;
    }

    if report.is_empty() {
        println!("No matches found for the search term.");
    } else {
        for outcome in report.outcomes() {
            print_outcome(outcome);
        }
    }

    println!();
    for outcome in report.outcomes() {
        println!(
            "{} time: {:.6} seconds",
            outcome.algorithm.label(),
            outcome.elapsed_secs()
        );
    }
}

fn print_outcome(outcome: &SearchOutcome) {
    let heading = match outcome.algorithm {
        Algorithm::Naive => "Brute Force Results",
        Algorithm::Kmp => "KMP Results",
    };
    println!("\n{}", heading.bold());

    let cwd = std::env::current_dir().ok();
    for (document, matches) in outcome.by_document() {
        println!("\n{}", display_path(document, cwd.as_deref()).blue());
        for m in matches {
            println!(
                "line {}, column {}: {}",
                m.line_number.to_string().green(),
                m.column.to_string().green(),
                m.line
            );
        }
    }

    println!(
        "\nFound {} matches in {} files",
        outcome.total_matches(),
        outcome.documents_with_matches()
    );
}

/// Shows a document id relative to `base` when it lies underneath it
fn display_path(document: &str, base: Option<&Path>) -> String {
    base.and_then(|base| Path::new(document).strip_prefix(base).ok())
        .map(|relative| relative.display().to_string())
        .unwrap_or_else(|| document.to_string())
}
