//! Decides which files found under a directory become documents.
//!
//! Only directory walks are filtered. A file named explicitly by the caller is
//! always loaded, whatever its extension. Paths are checked relative to the
//! directory being walked.
use glob::Pattern;
use std::path::Path;

/// Extensions that never hold searchable text
const BINARY_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "dylib", "bin", "obj", "o", "class", "jar", "png", "jpg", "jpeg", "gif",
    "bmp", "ico", "pdf", "doc", "docx", "xls", "xlsx", "odt", "zip", "tar", "gz", "7z", "rar",
    "mp3", "wav", "mp4",
];

/// Checks the file extension against the configured list (case-insensitive).
/// `None` accepts every extension.
pub fn has_valid_extension(path: &Path, extensions: Option<&[String]>) -> bool {
    let Some(exts) = extensions else {
        return true;
    };
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            exts.iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Checks if a path matches any of the glob ignore patterns
pub fn should_ignore(path: &Path, ignore_patterns: &[String]) -> bool {
    let normalized = path.to_string_lossy().replace('\\', "/");

    if normalized.contains("/.git/") || normalized.starts_with(".git/") {
        return true;
    }

    ignore_patterns.iter().any(|pattern| match Pattern::new(pattern) {
        Ok(p) => p.matches(&normalized),
        Err(_) => false,
    })
}

/// Checks if a file is likely to be binary, judging by extension only
pub fn is_likely_binary(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            BINARY_EXTENSIONS
                .iter()
                .any(|bin_ext| bin_ext.eq_ignore_ascii_case(ext))
        })
}

/// Determines if a file discovered during a directory walk should be loaded
pub fn should_include_file(
    path: &Path,
    extensions: Option<&[String]>,
    ignore_patterns: &[String],
) -> bool {
    !is_likely_binary(path)
        && has_valid_extension(path, extensions)
        && !should_ignore(path, ignore_patterns)
}
