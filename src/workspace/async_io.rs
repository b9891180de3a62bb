//! Async note I/O on top of `tokio::fs`.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::Result;

use super::note::{NoteContent, NoteMeta};

async fn meta_of(path: &Path) -> Result<NoteMeta> {
    let metadata = tokio::fs::metadata(path).await?;
    let modified: DateTime<Utc> = metadata.modified()?.into();
    Ok(NoteMeta {
        modified,
        size: metadata.len(),
    })
}

/// Read a note file asynchronously.
pub async fn read_note_async<P: AsRef<Path>>(path: P) -> Result<NoteContent> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let meta = meta_of(path).await?;
    Ok(NoteContent {
        content,
        modified: meta.modified,
        size: meta.size,
    })
}

/// Replace the content of a note file asynchronously.
pub async fn write_note_async<P: AsRef<Path>>(path: P, content: &str) -> Result<NoteMeta> {
    let path = path.as_ref();
    tokio::fs::write(path, content).await?;
    meta_of(path).await
}
