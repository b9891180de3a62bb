//! File system backed note store.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

use super::note::{is_markdown_name, normalize_note_name, NoteContent, NoteMeta};
use super::tree::{NoteTree, ScanOptions};
use super::NoteStore;

/// Note store rooted at a local directory.
///
/// Every path handed to the store is workspace-relative; paths that would
/// leave the root are rejected, including ones that pass through a symlink
/// pointing outside it.
#[derive(Debug, Clone)]
pub struct FsNoteStore {
    root: PathBuf,
    canonical_root: PathBuf,
}

impl FsNoteStore {
    /// Open a store at `root`, which must be an existing directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory: {}", root.display()),
            )));
        }
        Ok(Self {
            root: root.to_path_buf(),
            canonical_root: root.canonicalize()?,
        })
    }

    /// Workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a workspace-relative path to a file system path.
    ///
    /// The deepest existing part of the path is canonicalized and must lie
    /// under the root, so symlinks cannot lead out of the workspace.
    pub fn resolve(&self, rel: &str) -> Result<PathBuf> {
        let rel_path = Path::new(rel);
        let mut resolved = self.root.clone();
        for component in rel_path.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(Error::OutsideWorkspace(rel_path.to_path_buf())),
            }
        }
        self.confine(rel_path, &resolved)?;
        Ok(resolved)
    }

    fn confine(&self, rel: &Path, full: &Path) -> Result<()> {
        let existing = full
            .ancestors()
            .find(|p| fs::symlink_metadata(p).is_ok())
            .unwrap_or(self.root.as_path());
        let real = existing.canonicalize()?;
        if !real.starts_with(&self.canonical_root) {
            log::warn!("Rejected {}: resolves to {}", rel.display(), real.display());
            return Err(Error::OutsideWorkspace(rel.to_path_buf()));
        }
        Ok(())
    }

    fn note_path(&self, rel: &str) -> Result<PathBuf> {
        if !is_markdown_name(rel) {
            return Err(Error::NotMarkdown(PathBuf::from(rel)));
        }
        self.resolve(rel)
    }
}

fn meta_of(path: &Path) -> Result<NoteMeta> {
    let metadata = fs::metadata(path)?;
    let modified: DateTime<Utc> = metadata.modified()?.into();
    Ok(NoteMeta {
        modified,
        size: metadata.len(),
    })
}

impl NoteStore for FsNoteStore {
    fn scan(&self, options: &ScanOptions) -> Result<NoteTree> {
        NoteTree::scan(&self.root, options)
    }

    fn read(&self, path: &str) -> Result<NoteContent> {
        let full = self.note_path(path)?;
        let content = fs::read_to_string(&full)?;
        let meta = meta_of(&full)?;
        Ok(NoteContent {
            content,
            modified: meta.modified,
            size: meta.size,
        })
    }

    fn write(&self, path: &str, content: &str) -> Result<NoteMeta> {
        let full = self.note_path(path)?;
        fs::write(&full, content)?;
        log::info!("Saved {} ({} bytes)", path, content.len());
        meta_of(&full)
    }

    fn create(&self, dir: &str, name: &str, initial: &str) -> Result<String> {
        let file_name = normalize_note_name(name)?;
        let rel = if dir.trim_matches('/').is_empty() {
            file_name
        } else {
            format!("{}/{}", dir.trim_matches('/'), file_name)
        };
        let full = self.resolve(&rel)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => Error::NoteExists(PathBuf::from(&rel)),
                _ => Error::Io(e),
            })?;
        file.write_all(initial.as_bytes())?;

        log::info!("Created note {}", rel);
        Ok(rel)
    }

    fn modified(&self, path: &str) -> Result<DateTime<Utc>> {
        Ok(meta_of(&self.note_path(path)?)?.modified)
    }
}
