//! Line classification.
//!
//! Every source line is mapped to exactly one [`LineKind`]. Predicates are
//! evaluated in a fixed order: blank, fence, rule, heading, table start,
//! list item, paragraph. The first one that matches wins.

use std::sync::OnceLock;

use regex::Regex;

use super::table::is_divider;

/// Opening or closing marker of a fenced code block.
pub const FENCE: &str = "```";

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only line
    Blank,
    /// Opening code fence with optional language tag
    Fence { language: Option<&'a str> },
    /// Three or more repetitions of `-`, `*` or `_`
    Rule,
    /// ATX heading
    Heading { level: u8, text: &'a str },
    /// Table header line; the next line is a valid divider
    TableStart,
    /// Unordered list item
    ListItem { text: &'a str },
    /// Anything else
    Paragraph,
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap())
}

fn list_item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*]\s+(.*)$").unwrap())
}

/// Classify `line` (trailing whitespace already removed).
///
/// `next` is the following raw line, used only to recognize a table header.
pub fn classify<'a>(line: &'a str, next: Option<&str>) -> LineKind<'a> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(rest) = line.strip_prefix(FENCE) {
        let language = rest.trim();
        return LineKind::Fence {
            language: (!language.is_empty()).then_some(language),
        };
    }

    if is_rule(line) {
        return LineKind::Rule;
    }

    if let Some(caps) = heading_regex().captures(line) {
        if let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2)) {
            return LineKind::Heading {
                level: hashes.as_str().len() as u8,
                text: text.as_str().trim(),
            };
        }
    }

    if is_table_row(line) && next.is_some_and(is_divider) {
        return LineKind::TableStart;
    }

    if let Some(caps) = list_item_regex().captures(line) {
        if let Some(text) = caps.get(1) {
            return LineKind::ListItem {
                text: text.as_str(),
            };
        }
    }

    LineKind::Paragraph
}

/// Check whether a raw line closes a fenced code block.
pub fn is_fence_close(line: &str) -> bool {
    line.starts_with(FENCE)
}

/// Check whether a line is a horizontal rule: one of `-*_` repeated
/// three or more times, surrounding whitespace ignored.
pub fn is_rule(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(marker @ ('-' | '*' | '_')) => {
            trimmed.chars().count() >= 3 && chars.all(|c| c == marker)
        }
        _ => false,
    }
}

/// Check whether a line looks like a table row (contains a column separator).
pub fn is_table_row(line: &str) -> bool {
    line.contains('|')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert_eq!(classify("", None), LineKind::Blank);
        assert_eq!(classify(" \t ", None), LineKind::Blank);
    }

    #[test]
    fn test_fence() {
        assert_eq!(classify("```", None), LineKind::Fence { language: None });
        assert_eq!(
            classify("``` rust", None),
            LineKind::Fence {
                language: Some("rust")
            }
        );
        assert!(is_fence_close("```"));
        assert!(!is_fence_close(" ```"));
    }

    #[test]
    fn test_rule() {
        assert!(is_rule("---"));
        assert!(is_rule("  ****  "));
        assert!(is_rule(&"_".repeat(50)));
        assert!(!is_rule("--"));
        assert!(!is_rule("-*-"));
        assert!(!is_rule("- - -"));
        assert_eq!(classify("***", None), LineKind::Rule);
    }

    #[test]
    fn test_heading() {
        assert_eq!(
            classify("### Title ", None),
            LineKind::Heading {
                level: 3,
                text: "Title"
            }
        );
        assert_eq!(classify("####### seven", None), LineKind::Paragraph);
        assert_eq!(classify("#nospace", None), LineKind::Paragraph);
    }

    #[test]
    fn test_table_start_needs_divider() {
        assert_eq!(classify("a|b", Some("---|---")), LineKind::TableStart);
        assert_eq!(classify("a|b", Some("--|--")), LineKind::Paragraph);
        assert_eq!(classify("a|b", None), LineKind::Paragraph);
    }

    #[test]
    fn test_list_item() {
        assert_eq!(
            classify("- item", None),
            LineKind::ListItem { text: "item" }
        );
        assert_eq!(
            classify("*\tstar", None),
            LineKind::ListItem { text: "star" }
        );
        assert_eq!(classify("-dash", None), LineKind::Paragraph);
        assert_eq!(classify("-", None), LineKind::Paragraph);
    }

    #[test]
    fn test_spaced_markers_are_list_item() {
        assert_eq!(classify("- - -", None), LineKind::ListItem { text: "- -" });
        assert_eq!(classify("---", None), LineKind::Rule);
    }
}
