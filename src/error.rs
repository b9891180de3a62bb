//! Error types for marknote library.
//!
//! Rendering itself never fails; these errors come from the note workspace,
//! the editor session and serialization.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for marknote operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while working with notes.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not carry a Markdown extension.
    #[error("Not a Markdown note: {}", .0.display())]
    NotMarkdown(PathBuf),

    /// A note name was empty or contained path separators.
    #[error("Invalid note name: {0:?}")]
    InvalidNoteName(String),

    /// Creating a note would overwrite an existing file.
    #[error("Note already exists: {}", .0.display())]
    NoteExists(PathBuf),

    /// A path escapes the workspace root.
    #[error("Path is outside the workspace: {}", .0.display())]
    OutsideWorkspace(PathBuf),

    /// The session has no note open.
    #[error("No note is open")]
    NoOpenNote,

    /// Error during rendering or serialization (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
