//! Table row helpers.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Alignment, TableRow};

fn divider_cell_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^:?-{3,}:?$").unwrap())
}

/// Split a table line into trimmed cells.
///
/// One leading and one trailing `|` are removed before splitting.
pub fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(|c| c.trim().to_string()).collect()
}

/// Parse a table line into a row.
pub fn parse_row(line: &str) -> TableRow {
    TableRow::new(split_row(line))
}

/// Check whether a line is a divider row such as `|:---|---:|`.
pub fn is_divider(line: &str) -> bool {
    let cells = split_row(line);
    !cells.is_empty() && cells.iter().all(|c| divider_cell_regex().is_match(c))
}

/// Parse per-column alignments from a divider row.
pub fn parse_alignments(line: &str) -> Vec<Alignment> {
    split_row(line)
        .iter()
        .map(|c| Alignment::from_divider_cell(c))
        .collect()
}
