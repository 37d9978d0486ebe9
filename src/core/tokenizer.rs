//! Line tokenizer
//!
//! A raw line goes through three steps:
//! - sanitize: bytes outside printable ASCII become spaces
//! - split: maximal runs of non-separator characters are words
//! - normalize: ASCII lowercase
//!
//! Apostrophes and underscores are separators, so "don't" yields "don" and "t".

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that end a word (besides the line terminator)
pub const SEPARATORS: &str = " .;:,+\"'!?@#$%^&*()={}[]|~<>\\/-_";

/// One or more separators in a row
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    let class: String = SEPARATORS
        .chars()
        .chain(['\n'])
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    Regex::new(&format!("[{}]+", class)).expect("Invalid SEPARATOR_RE regex")
});

/// Same definition as C `isprint` in the "C" locale
#[inline]
fn is_printable(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

/// A line ready for splitting, with a count of replaced bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedLine {
    pub text: String,
    pub replaced: usize,
}

/// Replace every non-printable byte with a space.
///
/// The result is pure ASCII, so it is always valid UTF-8.
pub fn sanitize(raw: &[u8]) -> SanitizedLine {
    let mut replaced = 0;
    let text = raw
        .iter()
        .map(|&b| {
            if is_printable(b) {
                char::from(b)
            } else {
                replaced += 1;
                ' '
            }
        })
        .collect();
    SanitizedLine { text, replaced }
}

/// Split a sanitized line into its words, skipping empty runs
pub fn split_words(line: &str) -> impl Iterator<Item = &str> {
    SEPARATOR_RE.split(line).filter(|word| !word.is_empty())
}

/// Case-fold a word for use as a store key
pub fn normalize(word: &str) -> String {
    word.to_ascii_lowercase()
}

/// Sanitize, split and normalize one raw line
#[allow(dead_code)]
pub fn tokenize_line(raw: &[u8]) -> Vec<String> {
    let line = sanitize(raw);
    split_words(&line.text).map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple_sentence() {
        assert_eq!(tokenize_line(b"The cat sat."), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_tokenize_keeps_repeats() {
        assert_eq!(tokenize_line(b"the THE The"), vec!["the", "the", "the"]);
    }

    #[test]
    fn test_only_separators_yields_nothing() {
        assert!(tokenize_line(b"!!! ,,, ---").is_empty());
        assert!(tokenize_line(b"").is_empty());
        assert!(tokenize_line(b"\n").is_empty());
    }

    #[test]
    fn test_consecutive_separators_no_empty_tokens() {
        let words = tokenize_line(b"  hello,,,  world!!  ");
        assert_eq!(words, vec!["hello", "world"]);
        assert!(words.iter().all(|w| !w.is_empty()));
    }

    #[test]
    fn test_every_separator_splits() {
        for sep in SEPARATORS.chars() {
            let line = format!("a{}b", sep);
            assert_eq!(
                tokenize_line(line.as_bytes()),
                vec!["a", "b"],
                "separator {:?} did not split",
                sep
            );
        }
    }

    #[test]
    fn test_apostrophe_splits_contractions() {
        assert_eq!(tokenize_line(b"Don't stop"), vec!["don", "t", "stop"]);
    }

    #[test]
    fn test_non_separator_punctuation_stays_in_word() {
        // backtick is printable and not a separator
        assert_eq!(tokenize_line(b"a`b 42nd"), vec!["a`b", "42nd"]);
    }

    #[test]
    fn test_trailing_newline_is_separator() {
        assert_eq!(tokenize_line(b"end\n"), vec!["end"]);
    }

    #[test]
    fn test_sanitize_replaces_control_bytes() {
        let line = sanitize(b"tab\there\r");
        assert_eq!(line.text, "tab here ");
        assert_eq!(line.replaced, 2);
    }

    #[test]
    fn test_sanitize_replaces_non_ascii_bytes() {
        // "café" in UTF-8: the two bytes of é become separators
        let line = sanitize("café au".as_bytes());
        assert_eq!(line.text, "caf   au");
        assert_eq!(line.replaced, 2);
        assert_eq!(tokenize_line("café au".as_bytes()), vec!["caf", "au"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(tokenize_line(b"Hello World\r\n"), vec!["hello", "world"]);
    }

    #[test]
    fn test_normalize_only_folds_case() {
        assert_eq!(normalize("MiXeD"), "mixed");
        assert_eq!(normalize("abc123"), "abc123");
    }

    #[test]
    fn test_split_words_borrows_from_line() {
        let line = "alpha beta";
        let words: Vec<&str> = split_words(line).collect();
        assert_eq!(words, vec!["alpha", "beta"]);
    }
}
