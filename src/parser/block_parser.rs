//! Line-oriented block segmentation.

use crate::model::{Block, Document, Table};

use super::line::{classify, is_fence_close, is_table_row, LineKind};
use super::table::{parse_alignments, parse_row};

/// Splits Markdown text into blocks in a single pass over its lines.
///
/// The parser holds the cursor and the pending list run for one document;
/// nothing is shared between parses.
pub struct BlockParser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    list_items: Vec<String>,
    blocks: Vec<Block>,
}

impl<'a> BlockParser<'a> {
    /// Create a parser over `text`, splitting on LF or CR+LF.
    pub fn new(text: &'a str) -> Self {
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();
        Self {
            lines,
            pos: 0,
            list_items: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Consume the parser and return the document.
    pub fn parse(mut self) -> Document {
        while self.pos < self.lines.len() {
            let raw: &'a str = self.lines[self.pos];
            let line = raw.trim_end();
            let next = self.lines.get(self.pos + 1).copied();

            match classify(line, next) {
                LineKind::Blank => {
                    self.flush_list();
                    self.blocks.push(Block::Blank);
                    self.pos += 1;
                }
                LineKind::Fence { language } => {
                    self.flush_list();
                    let language = language.map(str::to_string);
                    self.pos += 1;
                    self.parse_code_block(language);
                }
                LineKind::Rule => {
                    self.flush_list();
                    self.blocks.push(Block::HorizontalRule);
                    self.pos += 1;
                }
                LineKind::Heading { level, text } => {
                    self.flush_list();
                    self.blocks.push(Block::heading(text, level));
                    self.pos += 1;
                }
                LineKind::TableStart => {
                    self.flush_list();
                    self.parse_table(line);
                }
                LineKind::ListItem { text } => {
                    self.list_items.push(text.to_string());
                    self.pos += 1;
                }
                LineKind::Paragraph => {
                    self.flush_list();
                    self.blocks.push(Block::paragraph(line));
                    self.pos += 1;
                }
            }
        }
        self.flush_list();

        log::debug!(
            "BlockParser: {} lines segmented into {} blocks",
            self.lines.len(),
            self.blocks.len()
        );
        Document::from_blocks(self.blocks)
    }

    /// Consume raw lines up to the closing fence (or end of input).
    fn parse_code_block(&mut self, language: Option<String>) {
        let start = self.pos;
        while self.pos < self.lines.len() && !is_fence_close(self.lines[self.pos]) {
            self.pos += 1;
        }
        let code = self.lines[start..self.pos]
            .join("\n")
            .trim_end_matches('\n')
            .to_string();

        if self.pos < self.lines.len() {
            // closing fence
            self.pos += 1;
        } else {
            log::debug!(
                "BlockParser: unterminated code fence at line {}, consumed to end of input",
                start
            );
        }

        self.blocks.push(Block::CodeBlock { language, code });
    }

    /// Consume header, divider and every following line that still looks like a row.
    fn parse_table(&mut self, header: &str) {
        let alignments = parse_alignments(self.lines[self.pos + 1]);
        let mut table = Table::new(parse_row(header), alignments);
        self.pos += 2;

        while self.pos < self.lines.len() && is_table_row(self.lines[self.pos]) {
            table.add_row(parse_row(self.lines[self.pos]));
            self.pos += 1;
        }

        log::debug!(
            "BlockParser: table with {} columns and {} body rows",
            table.column_count(),
            table.row_count()
        );
        self.blocks.push(Block::Table(table));
    }

    fn flush_list(&mut self) {
        if !self.list_items.is_empty() {
            let items = std::mem::take(&mut self.list_items);
            self.blocks.push(Block::List { items });
        }
    }
}
