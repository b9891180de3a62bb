//! Markdown block parsing module.

mod block_parser;
mod line;
mod table;

pub use block_parser::BlockParser;
pub use line::{classify, is_rule, is_table_row, LineKind, FENCE};
pub use table::{is_divider, parse_alignments, split_row};

use crate::model::Document;

/// Parse Markdown text into a document of blocks.
pub fn parse(text: &str) -> Document {
    BlockParser::new(text).parse()
}
