//! Inline span transformation.
//!
//! Applied as a fixed sequence of non-recursive passes: escape, code spans,
//! bold, italic, links. Code span contents are swapped out for placeholders
//! while the emphasis and link passes run, so markers inside code are never
//! transformed but a link label still sees resolved code, bold and italic.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::escape::escape_html;

const SHIELD_OPEN: char = '\u{E000}';
const SHIELD_CLOSE: char = '\u{E001}';

fn code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").unwrap())
}

fn bold_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap())
}

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap())
}

fn shield_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("\u{E000}([0-9]+)\u{E001}").unwrap())
}

/// Inline renderer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineOptions {
    /// Open links in a new browsing context without referrer or opener
    pub links_new_tab: bool,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            links_new_tab: true,
        }
    }
}

/// Transform block text into HTML with inline spans.
pub fn render_inline(text: &str, options: &InlineOptions) -> String {
    let escaped = escape_html(text)
        .replace(SHIELD_OPEN, "&#xE000;")
        .replace(SHIELD_CLOSE, "&#xE001;");

    let mut code_spans: Vec<String> = Vec::new();
    let shielded = code_regex().replace_all(&escaped, |caps: &Captures| {
        code_spans.push(caps[1].to_string());
        format!("{}{}{}", SHIELD_OPEN, code_spans.len() - 1, SHIELD_CLOSE)
    });

    let bold = bold_regex().replace_all(&shielded, "<strong>${1}</strong>");
    let italic = apply_italic(&bold);

    let target = if options.links_new_tab {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };
    let linked = link_regex().replace_all(&italic, |caps: &Captures| {
        format!(r#"<a href="{}"{}>{}</a>"#, &caps[2], target, &caps[1])
    });

    if code_spans.is_empty() {
        return linked.into_owned();
    }
    shield_regex()
        .replace_all(&linked, |caps: &Captures| {
            let span = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| code_spans.get(i))
                .map(String::as_str)
                .unwrap_or_default();
            format!("<code>{}</code>", span)
        })
        .into_owned()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Wrap `*text*` in `<em>` when the opening star follows the start of the
/// string or a non-word character and the closing star precedes a non-word
/// character or the end.
fn apply_italic(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut copied = 0;
    let mut pos = 0;

    while pos < text.len() {
        match italic_at(text, pos) {
            Some((open, close)) => {
                out.push_str(&text[copied..open]);
                out.push_str("<em>");
                out.push_str(&text[open + 1..close]);
                out.push_str("</em>");
                copied = close + 1;
                pos = close + 1;
            }
            None => pos += text[pos..].chars().next().map_or(1, char::len_utf8),
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Try a match whose boundary starts at byte `pos`.
fn italic_at(text: &str, pos: usize) -> Option<(usize, usize)> {
    if pos == 0 {
        if let Some(found) = italic_from(text, 0) {
            return Some(found);
        }
    }
    let boundary = text[pos..].chars().next()?;
    if is_word_char(boundary) {
        return None;
    }
    italic_from(text, pos + boundary.len_utf8())
}

fn italic_from(text: &str, open: usize) -> Option<(usize, usize)> {
    if text.as_bytes().get(open) != Some(&b'*') {
        return None;
    }
    let close = open + 1 + text[open + 1..].find('*')?;
    if close == open + 1 {
        return None;
    }
    match text[close + 1..].chars().next() {
        Some(c) if is_word_char(c) => None,
        _ => Some((open, close)),
    }
}
