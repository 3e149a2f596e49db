//! Low-level helpers for slicing data lines
//!
//! Delimiters searched here are ASCII, so splitting at their byte offsets
//! always lands on UTF-8 character boundaries.

use atoi::FromRadix10Checked;
use memchr::{memchr, memchr_iter};

/// Split a data line into its tab-separated fields
#[inline]
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(10);
    let mut start = 0;
    for pos in memchr_iter(b'\t', line.as_bytes()) {
        fields.push(&line[start..pos]);
        start = pos + 1;
    }
    fields.push(&line[start..]);
    fields
}

// Divide a field into two at the first delim
#[inline]
pub fn split_once(field: &str, delim: u8) -> Option<(&str, &str)> {
    let pos = memchr(delim, field.as_bytes())?;
    Some((&field[..pos], &field[pos + 1..]))
}

/// Whether the ID field denotes a multi-word token range like `3-4`
#[inline]
pub fn is_range(field: &str) -> bool {
    memchr(b'-', field.as_bytes()).is_some()
}

/// Parse a non-negative decimal index; the whole field must be digits
#[inline]
pub fn parse_index(field: &str) -> Option<usize> {
    let bytes = field.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    match usize::from_radix_10_checked(bytes) {
        (Some(n), used) if used == bytes.len() => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== split_fields Tests =====

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("1\tThe\tthe"), ["1", "The", "the"]);
        assert_eq!(split_fields("single"), ["single"]);
        assert_eq!(split_fields(""), [""]);

        // Empty fields between consecutive tabs are kept
        assert_eq!(split_fields("a\t\tb"), ["a", "", "b"]);
        assert_eq!(split_fields("a\t"), ["a", ""]);

        // Multi-byte characters
        assert_eq!(split_fields("1-2\tvámonos\t_"), ["1-2", "vámonos", "_"]);
    }

    // ===== split_once Tests =====

    #[test]
    fn test_split_once() {
        assert_eq!(split_once("3-4", b'-'), Some(("3", "4")));
        assert_eq!(split_once("12", b'-'), None);
        assert_eq!(split_once("-4", b'-'), Some(("", "4")));
        assert_eq!(split_once("1-2-3", b'-'), Some(("1", "2-3")));
    }

    #[test]
    fn test_is_range() {
        assert!(is_range("1-2"));
        assert!(!is_range("12"));
        assert!(!is_range("2.1"));
    }

    // ===== parse_index Tests =====

    #[test]
    fn test_parse_index_valid() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("42"), Some(42));
        assert_eq!(parse_index("007"), Some(7));
        assert_eq!(parse_index("18446744073709551615"), Some(usize::MAX));
    }

    #[test]
    fn test_parse_index_invalid() {
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("_"), None);
        assert_eq!(parse_index("12a"), None);
        assert_eq!(parse_index("2.1"), None);
        assert_eq!(parse_index("-42"), None);
        assert_eq!(parse_index(" 42"), None);
        assert_eq!(parse_index("18446744073709551616"), None);
    }
}
