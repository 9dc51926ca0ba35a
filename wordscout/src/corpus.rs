//! In-memory documents the engine searches.
//!
//! A [`Corpus`] keeps documents in insertion order and enforces unique
//! identifiers: inserting an identifier that is already present replaces that
//! document in place, keeping its original position. The engine only ever
//! borrows a corpus immutably.
use serde::Serialize;
use std::collections::HashMap;
use std::iter::FusedIterator;

/// Returns true for every character that ends a line.
///
/// Besides `\n` and `\r` this covers the vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators.
pub fn is_line_terminator(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Splits document text into lines.
///
/// This is the single line rule used everywhere. Any character accepted by
/// [`is_line_terminator`] ends a line, and `\r\n` counts as one terminator.
/// Terminators are not part of the yielded lines, and a final terminator does
/// not produce an extra empty line.
pub fn split_lines(text: &str) -> Lines<'_> {
    Lines { rest: text }
}

/// Iterator returned by [`split_lines`]
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.char_indices().find(|&(_, ch)| is_line_terminator(ch)) {
            Some((index, ch)) => {
                let line = &self.rest[..index];
                let mut end = index + ch.len_utf8();
                if ch == '\r' && self.rest[end..].starts_with('\n') {
                    end += 1;
                }
                self.rest = &self.rest[end..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

impl FusedIterator for Lines<'_> {}

/// A loaded text document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    id: String,
    text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> Lines<'_> {
        split_lines(&self.text)
    }
}

/// An ordered set of documents keyed by identifier
#[derive(Debug, Clone, Default, Serialize)]
pub struct Corpus {
    documents: Vec<Document>,
    // id -> position in `documents`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, returning the one it replaced if the id was taken
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) -> Option<Document> {
        let document = Document::new(id, text);
        match self.index.get(document.id()) {
            Some(&position) => Some(std::mem::replace(&mut self.documents[position], document)),
            None => {
                self.index
                    .insert(document.id().to_string(), self.documents.len());
                self.documents.push(document);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.index.get(id).map(|&position| &self.documents[position])
    }

    pub fn remove(&mut self, id: &str) -> Option<Document> {
        let position = self.index.remove(id)?;
        let removed = self.documents.remove(position);
        for document in &self.documents[position..] {
            if let Some(p) = self.index.get_mut(document.id()) {
                *p -= 1;
            }
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.documents.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(Document::id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<I, T> FromIterator<(I, T)> for Corpus
where
    I: Into<String>,
    T: Into<String>,
{
    fn from_iter<It: IntoIterator<Item = (I, T)>>(iter: It) -> Self {
        let mut corpus = Corpus::new();
        for (id, text) in iter {
            corpus.insert(id, text);
        }
        corpus
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_rule() {
        let lines: Vec<_> = split_lines("foo\nbar\nfoobar").collect();
        assert_eq!(lines, vec!["foo", "bar", "foobar"]);

        // No trailing empty line for a final terminator
        let lines: Vec<_> = split_lines("foo\nbar\n").collect();
        assert_eq!(lines, vec!["foo", "bar"]);

        // CRLF endings lose their carriage return
        let lines: Vec<_> = split_lines("one\r\ntwo\r\n").collect();
        assert_eq!(lines, vec!["one", "two"]);

        // Interior blank lines still count toward line numbers
        let lines: Vec<_> = split_lines("a\n\nb").collect();
        assert_eq!(lines, vec!["a", "", "b"]);

        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("\n").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_split_lines_bare_carriage_return() {
        let lines: Vec<_> = split_lines("foo\rbar\rfoo").collect();
        assert_eq!(lines, vec!["foo", "bar", "foo"]);

        // Mixed endings; "\r\n" is a single break, "\n\r" is two
        let lines: Vec<_> = split_lines("a\r\nb\rc\nd\n\re\r").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d", "", "e"]);
    }

    #[test]
    fn test_split_lines_other_terminators() {
        let lines: Vec<_> = split_lines("foo\u{2028}foo\x0cfoo").collect();
        assert_eq!(lines, vec!["foo", "foo", "foo"]);

        let text = "1\u{0b}2\u{1c}3\u{1d}4\u{1e}5\u{85}6\u{2029}7";
        let lines: Vec<_> = split_lines(text).collect();
        assert_eq!(lines, vec!["1", "2", "3", "4", "5", "6", "7"]);

        // Tabs and ordinary whitespace are not terminators
        assert_eq!(split_lines("a\tb c").count(), 1);
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut corpus = Corpus::new();
        corpus.insert("b.txt", "beta");
        corpus.insert("a.txt", "alpha");
        corpus.insert("c.txt", "gamma");
        assert_eq!(corpus.ids().collect::<Vec<_>>(), vec!["b.txt", "a.txt", "c.txt"]);
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut corpus = Corpus::new();
        corpus.insert("a.txt", "old");
        corpus.insert("b.txt", "other");
        let replaced = corpus.insert("a.txt", "new");

        assert_eq!(replaced.map(|d| d.text().to_string()), Some("old".to_string()));
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get("a.txt").map(Document::text), Some("new"));
        assert_eq!(corpus.ids().next(), Some("a.txt"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut corpus: Corpus = [("a", "1"), ("b", "2")].into_iter().collect();
        assert!(corpus.remove("a").is_some());
        assert!(corpus.remove("a").is_none());
        assert_eq!(corpus.len(), 1);
        corpus.clear();
        assert!(corpus.is_empty());
        assert!(corpus.get("b").is_none());
    }

    #[test]
    fn test_lookup_after_remove_and_reinsert() {
        let mut corpus: Corpus = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        corpus.remove("a");

        assert_eq!(corpus.get("b").map(Document::text), Some("2"));
        assert_eq!(corpus.get("c").map(Document::text), Some("3"));

        corpus.insert("c", "33");
        corpus.insert("a", "11");
        assert_eq!(corpus.ids().collect::<Vec<_>>(), vec!["b", "c", "a"]);
        assert_eq!(corpus.get("c").map(Document::text), Some("33"));
        assert_eq!(corpus.len(), 3);
    }
}
