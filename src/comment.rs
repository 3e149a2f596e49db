//! Sentence-level comment lines
//!
//! `# sent_id = ...` and `# text = ...` carry sentence metadata; everything
//! else starting with `#` is kept as free-text comment.

use once_cell::sync::Lazy;
use regex::Regex;

// The `=` after sent_id only became mandatory in UD v2.0; older treebanks omit it.
static SENT_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^# sent_id\s*=?\s*(\S+)").unwrap());
static TEXT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^# text\s*=\s*(.+)").unwrap());

/// Kind of a `#` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comment<'a> {
    SentId(&'a str),
    Text(&'a str),
    /// Anything else, with the leading `#` removed
    Free(&'a str),
}

/// Classify a line that starts with `#`
pub fn classify(line: &str) -> Comment<'_> {
    if let Some(m) = SENT_ID_REGEX.captures(line).and_then(|c| c.get(1)) {
        return Comment::SentId(m.as_str());
    }
    if let Some(m) = TEXT_REGEX.captures(line).and_then(|c| c.get(1)) {
        return Comment::Text(m.as_str());
    }
    Comment::Free(line.strip_prefix('#').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sent_id_forms() {
        assert_eq!(classify("# sent_id = weblog-12"), Comment::SentId("weblog-12"));
        assert_eq!(classify("# sent_id weblog-12"), Comment::SentId("weblog-12"));
        assert_eq!(classify("# sent_id=7"), Comment::SentId("7"));
    }

    #[test]
    fn test_text_keeps_spaces() {
        assert_eq!(classify("# text = Hello world."), Comment::Text("Hello world."));
        assert_eq!(classify("# text=a  b"), Comment::Text("a  b"));
    }

    #[test]
    fn test_text_requires_equals() {
        assert_eq!(classify("# text Hello"), Comment::Free(" text Hello"));
    }

    #[test]
    fn test_free_comment() {
        assert_eq!(classify("# newdoc id = x"), Comment::Free(" newdoc id = x"));
        assert_eq!(classify("#"), Comment::Free(""));
        assert_eq!(classify("#sent_id = 3"), Comment::Free("sent_id = 3"));
    }
}
