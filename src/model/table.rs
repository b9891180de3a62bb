//! Table types.

use serde::{Deserialize, Serialize};

/// Column alignment derived from a table divider row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (also used when the divider carries no colons)
    #[default]
    Left,
    /// Center alignment (`:---:`)
    Center,
    /// Right alignment (`---:`)
    Right,
}

impl Alignment {
    /// Parse the alignment of a single divider cell such as `:---:`.
    pub fn from_divider_cell(cell: &str) -> Self {
        let cell = cell.trim();
        let left = cell.starts_with(':');
        let right = cell.ends_with(':');
        match (left, right) {
            (true, true) => Alignment::Center,
            (false, true) => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    /// CSS `text-align` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A GitHub-style table: a header row, per-column alignments and body rows.
///
/// Body rows are not required to match the header's cell count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header row
    pub header: TableRow,

    /// Alignment per declared column (length = divider cell count)
    pub alignments: Vec<Alignment>,

    /// Body rows
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a table with a header row and column alignments.
    pub fn new(header: TableRow, alignments: Vec<Alignment>) -> Self {
        Self {
            header,
            alignments,
            rows: Vec::new(),
        }
    }

    /// Add a body row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Alignment of a column; columns past the divider default to left.
    pub fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    /// Number of declared columns.
    pub fn column_count(&self) -> usize {
        self.alignments.len()
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.header)
            .chain(self.rows.iter())
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row as an ordered list of raw cell strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<String>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(Into::into).collect())
    }

    /// Number of cells in this row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells.join("\t")
    }
}
