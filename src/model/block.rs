//! Block-level types produced by line segmentation.

use super::Table;
use serde::{Deserialize, Serialize};

/// A contiguous run of source lines classified into exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A blank line, kept to preserve paragraph spacing in the output
    Blank,

    /// Fenced code, content kept verbatim (no inline processing)
    CodeBlock {
        /// Language tag after the opening fence
        language: Option<String>,
        /// Raw content with trailing newlines removed
        code: String,
    },

    /// ATX heading
    Heading {
        /// Level 1-6
        level: u8,
        /// Heading text, trimmed
        text: String,
    },

    /// Thematic break (`---`, `***`, `___`)
    HorizontalRule,

    /// GitHub-style table
    Table(Table),

    /// Run of consecutive `-`/`*` list items; never empty
    List {
        /// Raw item texts in order
        items: Vec<String>,
    },

    /// Any other line
    Paragraph {
        /// Line text with trailing whitespace removed
        text: String,
    },
}

impl Block {
    /// Create a heading block, clamping the level into 1-6.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Short lowercase name of the block kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Blank => "blank",
            Block::CodeBlock { .. } => "code_block",
            Block::Heading { .. } => "heading",
            Block::HorizontalRule => "horizontal_rule",
            Block::Table(_) => "table",
            Block::List { .. } => "list",
            Block::Paragraph { .. } => "paragraph",
        }
    }

    /// Check if this is a blank separator.
    pub fn is_blank(&self) -> bool {
        matches!(self, Block::Blank)
    }

    /// Get plain text content of the block (source text, markup untouched).
    pub fn plain_text(&self) -> String {
        match self {
            Block::Blank | Block::HorizontalRule => String::new(),
            Block::CodeBlock { code, .. } => code.clone(),
            Block::Heading { text, .. } | Block::Paragraph { text } => text.clone(),
            Block::Table(table) => table.plain_text(),
            Block::List { items } => items.join("\n"),
        }
    }
}

/// A parsed Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Blocks in document order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from already segmented blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Add a block to the document.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over headings as `(level, text)` pairs.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        })
    }

    /// Title of the document: the text of the first level-1 heading.
    pub fn title(&self) -> Option<&str> {
        self.headings()
            .find(|(level, _)| *level == 1)
            .map(|(_, text)| text)
    }

    /// Get plain text content of all non-blank blocks.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter(|b| !b.is_blank())
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
