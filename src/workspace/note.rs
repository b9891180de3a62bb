//! Note content, metadata and naming rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// File extensions recognized as Markdown notes.
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".md", ".markdown"];

/// Initial content written into a newly created note.
pub const NEW_NOTE_TEMPLATE: &str = "# New note\n\n";

/// Content of a note read from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContent {
    /// Full text of the note
    pub content: String,

    /// Last modification time
    pub modified: DateTime<Utc>,

    /// Size in bytes
    pub size: u64,
}

impl NoteContent {
    /// Metadata part of this content.
    pub fn meta(&self) -> NoteMeta {
        NoteMeta {
            modified: self.modified,
            size: self.size,
        }
    }
}

/// Metadata returned after writing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMeta {
    /// Last modification time
    pub modified: DateTime<Utc>,

    /// Size in bytes
    pub size: u64,
}

/// Check whether `name` ends with one of `extensions` (case-insensitive).
pub fn has_extension<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    let lower = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.as_ref().to_lowercase()))
}

/// Check whether `name` is a Markdown note file name.
pub fn is_markdown_name(name: &str) -> bool {
    has_extension(name, &DEFAULT_EXTENSIONS)
}

/// Normalize a user-supplied note name into a file name.
///
/// The name is trimmed and NFC-normalized; `.md` is appended unless it
/// already carries a Markdown extension.
pub fn normalize_note_name(name: &str) -> Result<String> {
    let name: String = name.trim().nfc().collect();

    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control)
    {
        return Err(Error::InvalidNoteName(name));
    }

    if is_markdown_name(&name) {
        Ok(name)
    } else {
        Ok(format!("{}.md", name))
    }
}
