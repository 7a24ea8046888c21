// Copyright (c) 2025-2026 the gitscribe contributors
// SPDX-License-Identifier: Apache-2.0

//! Content sanitizing: decoding, content screening, comment stripping and
//! markup escaping.

use crate::utils::error::GitscribeError;
use regex::Regex;
use std::borrow::Cow;

/// Decode bytes as UTF-8, replacing invalid sequences with U+FFFD.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Result of screening decoded text before it is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCheck {
    Text,
    Binary,
    Oversized { chars: usize },
}

/// Screen decoded text for embedded NULs and for the character limit.
pub fn check_content(text: &str, max_chars: usize) -> ContentCheck {
    if text.contains('\0') {
        return ContentCheck::Binary;
    }
    // Byte length is an upper bound on the character count.
    if text.len() > max_chars {
        let chars = text.chars().count();
        if chars > max_chars {
            return ContentCheck::Oversized { chars };
        }
    }
    ContentCheck::Text
}

/// Removes lines that start, after leading whitespace, with a comment marker.
///
/// This is purely textual. A line inside a string literal or block comment
/// that happens to start with a marker is removed too. Since `\s` also matches
/// line breaks, blank lines directly above a comment line go with it.
#[derive(Debug, Clone)]
pub struct CommentStripper {
    patterns: Vec<Regex>,
}

impl CommentStripper {
    pub fn new(markers: &[String]) -> Result<Self, GitscribeError> {
        let patterns = markers
            .iter()
            .map(|marker| {
                Regex::new(&format!(r"(?m)^\s*{}.*\n?", regex::escape(marker))).map_err(|e| {
                    GitscribeError::Config(format!("Invalid comment marker '{}': {}", marker, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Apply each marker's pattern in turn.
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(text);
        for pattern in &self.patterns {
            let stripped = match pattern.replace_all(&current, "") {
                Cow::Borrowed(_) => None,
                Cow::Owned(text) => Some(text),
            };
            if let Some(text) = stripped {
                current = Cow::Owned(text);
            }
        }
        current
    }
}

/// Escape `&`, `<` and `>` for element content.
pub fn escape_content(text: &str) -> Cow<'_, str> {
    quick_xml::escape::partial_escape(text)
}

/// Escape a value for a single-quoted attribute, quotes included.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_stripper() -> CommentStripper {
        CommentStripper::new(&["#".to_string(), "//".to_string()]).unwrap()
    }

    #[test]
    fn test_decode_lossy_replaces_invalid_bytes() {
        let decoded = decode_lossy(b"ok\xff\xfeend");
        assert!(decoded.starts_with("ok"));
        assert!(decoded.ends_with("end"));
        assert!(decoded.contains('\u{FFFD}'));
    }

    #[test]
    fn test_check_content() {
        assert_eq!(check_content("plain text", 100), ContentCheck::Text);
        assert_eq!(check_content("a\0b", 100), ContentCheck::Binary);
        assert_eq!(
            check_content(&"x".repeat(101), 100),
            ContentCheck::Oversized { chars: 101 }
        );
        assert_eq!(check_content(&"x".repeat(100), 100), ContentCheck::Text);
    }

    #[test]
    fn test_check_content_counts_characters_not_bytes() {
        // 60 two-byte characters: 120 bytes, 60 chars.
        let text = "\u{e9}".repeat(60);
        assert_eq!(check_content(&text, 100), ContentCheck::Text);
    }

    #[test]
    fn test_strip_both_markers() {
        let stripped = default_stripper().strip("# comment\ncode_line\n// another comment\nmore_code\n");
        assert_eq!(stripped, "code_line\nmore_code\n");
    }

    #[test]
    fn test_strip_indented_comment() {
        let stripped = default_stripper().strip("fn a() {\n    // note\n    body();\n}\n");
        assert_eq!(stripped, "fn a() {\n    body();\n}\n");
    }

    #[test]
    fn test_trailing_comment_is_kept() {
        let text = "let x = 1; // why\n";
        assert_eq!(default_stripper().strip(text), text);
    }

    #[test]
    fn test_final_comment_without_newline() {
        assert_eq!(default_stripper().strip("code\n# last"), "code\n");
    }

    #[test]
    fn test_blank_lines_before_comment_are_removed() {
        assert_eq!(default_stripper().strip("a\n\n\n# c\nb\n"), "a\nb\n");
    }

    #[test]
    fn test_string_literal_lines_are_stripped_too() {
        let text = "let s = \"\n#not a comment\n\";\n";
        assert_eq!(default_stripper().strip(text), "let s = \"\n\";\n");
    }

    #[test]
    fn test_no_markers_leaves_text_untouched() {
        let stripper = CommentStripper::new(&[]).unwrap();
        let text = "# kept\n";
        assert!(matches!(stripper.strip(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_content() {
        assert_eq!(
            escape_content("<tag>&value</tag>"),
            "&lt;tag&gt;&amp;value&lt;/tag&gt;"
        );
        assert_eq!(escape_content("it's \"fine\""), "it's \"fine\"");
    }

    #[test]
    fn test_escape_attribute_escapes_quotes() {
        assert_eq!(escape_attribute("it's.rs"), "it&apos;s.rs");
        assert_eq!(escape_attribute("main.rs"), "main.rs");
    }
}
