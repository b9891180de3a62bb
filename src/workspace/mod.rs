//! Note workspace: a directory of Markdown notes.
//!
//! The [`NoteStore`] trait is the seam between the editor core and whatever
//! holds the files. [`FsNoteStore`] implements it over a local directory.
//!
//! # Example
//!
//! ```no_run
//! use marknote::workspace::{FsNoteStore, NoteStore, ScanOptions};
//!
//! fn main() -> marknote::Result<()> {
//!     let store = FsNoteStore::open("notes")?;
//!     let tree = store.scan(&ScanOptions::default())?;
//!     for path in tree.files() {
//!         let note = store.read(path)?;
//!         println!("{} ({} bytes)", path, note.size);
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "async")]
mod async_io;
mod export;
mod fs_store;
mod note;
mod tree;

#[cfg(feature = "async")]
pub use async_io::{read_note_async, write_note_async};
pub use export::{export_workspace, export_workspace_with, html_path_for, ExportReport};
pub use fs_store::FsNoteStore;
pub use note::{
    has_extension, is_markdown_name, normalize_note_name, NoteContent, NoteMeta,
    DEFAULT_EXTENSIONS, NEW_NOTE_TEMPLATE,
};
pub use tree::{NoteNode, NoteTree, ScanOptions};

use chrono::{DateTime, Utc};

use crate::error::Result;

/// Trait for note storage backends.
///
/// Paths are workspace-relative with `/` separators.
pub trait NoteStore: Send + Sync {
    /// Scan the workspace for notes.
    fn scan(&self, options: &ScanOptions) -> Result<NoteTree>;

    /// Read a note.
    fn read(&self, path: &str) -> Result<NoteContent>;

    /// Replace the content of a note.
    fn write(&self, path: &str, content: &str) -> Result<NoteMeta>;

    /// Create a new note named `name` inside `dir` and return its path.
    ///
    /// Never overwrites an existing file.
    fn create(&self, dir: &str, name: &str, initial: &str) -> Result<String>;

    /// Last modification time of a note.
    fn modified(&self, path: &str) -> Result<DateTime<Utc>>;
}
