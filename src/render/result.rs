//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Block, Document};

/// Result of rendering a note, including the HTML and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub html: String,

    /// Text of the first level-1 heading, if any
    pub title: Option<String>,

    /// Block statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(html: String, title: Option<String>, stats: RenderStats) -> Self {
        Self { html, title, stats }
    }

    /// Create a simple result with just HTML.
    pub fn html_only(html: String) -> Self {
        Self {
            html,
            title: None,
            stats: RenderStats::default(),
        }
    }

    /// Get the HTML length in bytes.
    pub fn html_len(&self) -> usize {
        self.html.len()
    }
}

/// Statistics collected while rendering a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of list runs
    pub list_count: u32,

    /// Number of list items across all runs
    pub list_item_count: u32,

    /// Number of fenced code blocks
    pub code_block_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of horizontal rules
    pub horizontal_rule_count: u32,

    /// Approximate word count of the source text (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count of the source text (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one block.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Blank => {}
            Block::CodeBlock { .. } => self.code_block_count += 1,
            Block::Heading { .. } => self.heading_count += 1,
            Block::HorizontalRule => self.horizontal_rule_count += 1,
            Block::Table(_) => self.table_count += 1,
            Block::List { items } => {
                self.list_count += 1;
                self.list_item_count += items.len() as u32;
            }
            Block::Paragraph { .. } => self.paragraph_count += 1,
        }
    }

    /// Count every block of a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.code_block_count += other.code_block_count;
        self.table_count += other.table_count;
        self.horizontal_rule_count += other.horizontal_rule_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
