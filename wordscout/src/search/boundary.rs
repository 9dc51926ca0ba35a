use serde::{Deserialize, Serialize};

/// Which characters count as "word" characters in whole-word mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordClassifier {
    /// Any Unicode letter or digit (`char::is_alphanumeric`)
    #[default]
    Unicode,
    /// ASCII letters and digits only
    Ascii,
}

impl WordClassifier {
    pub fn is_word_char(self, ch: char) -> bool {
        match self {
            WordClassifier::Unicode => ch.is_alphanumeric(),
            WordClassifier::Ascii => ch.is_ascii_alphanumeric(),
        }
    }

    /// Checks that the `len` characters at `start` are not glued to word
    /// characters on either side. Line edges always count as boundaries.
    pub fn is_whole_word(self, line: &[char], start: usize, len: usize) -> bool {
        let end = start + len;
        let before_ok = start == 0 || !self.is_word_char(line[start - 1]);
        let after_ok = end >= line.len() || !self.is_word_char(line[end]);
        before_ok && after_ok
    }
}

impl std::str::FromStr for WordClassifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unicode" => Ok(WordClassifier::Unicode),
            "ascii" => Ok(WordClassifier::Ascii),
            other => Err(format!("unknown word classifier '{other}' (expected unicode|ascii)")),
        }
    }
}
