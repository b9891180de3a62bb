//! Document model types for Markdown notes.
//!
//! The model is the block-level intermediate representation that sits
//! between line segmentation and HTML rendering.

mod block;
mod table;

pub use block::{Block, Document};
pub use table::{Alignment, Table, TableRow};
