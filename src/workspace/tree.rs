//! Note tree scanning.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::note::{has_extension, DEFAULT_EXTENSIONS};

/// Options for scanning a note directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Accepted file extensions including the dot (e.g., ".md")
    pub extensions: Vec<String>,

    /// Include entries whose name starts with a dot
    pub include_hidden: bool,
}

impl ScanOptions {
    /// Create new scan options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accepted file extensions.
    pub fn with_extensions<S: Into<String>>(mut self, extensions: impl IntoIterator<Item = S>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Include or skip hidden entries.
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Check whether a file name is accepted.
    pub fn accepts(&self, name: &str) -> bool {
        has_extension(name, &self.extensions)
    }

    fn skips(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
        }
    }
}

/// A node in the note tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NoteNode {
    /// A directory with its sorted children
    Directory {
        /// Entry name ("/" for the root)
        name: String,
        /// Workspace-relative path ("" for the root)
        path: String,
        /// Directories first, then files
        children: Vec<NoteNode>,
    },
    /// A note file
    File {
        /// File name
        name: String,
        /// Workspace-relative path
        path: String,
    },
}

impl NoteNode {
    /// Entry name.
    pub fn name(&self) -> &str {
        match self {
            NoteNode::Directory { name, .. } | NoteNode::File { name, .. } => name,
        }
    }

    /// Workspace-relative path with `/` separators.
    pub fn path(&self) -> &str {
        match self {
            NoteNode::Directory { path, .. } | NoteNode::File { path, .. } => path,
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NoteNode::Directory { .. })
    }

    /// Children of a directory (empty for files).
    pub fn children(&self) -> &[NoteNode] {
        match self {
            NoteNode::Directory { children, .. } => children,
            NoteNode::File { .. } => &[],
        }
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            NoteNode::File { path, .. } => out.push(path),
            NoteNode::Directory { children, .. } => {
                for child in children {
                    child.collect_files(out);
                }
            }
        }
    }
}

/// Directories before files, then case-insensitive name, then exact name.
fn compare_nodes(a: &NoteNode, b: &NoteNode) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
        .then_with(|| a.name().cmp(b.name()))
}

/// Tree of Markdown notes under a workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTree {
    /// Root directory node
    pub root: NoteNode,
}

impl NoteTree {
    /// Scan `root` recursively for notes.
    ///
    /// Directories are kept even when they hold no notes. Subdirectories that
    /// cannot be read are skipped with a warning.
    pub fn scan(root: &Path, options: &ScanOptions) -> Result<Self> {
        let children = scan_dir(root, "", options)?;
        let tree = Self {
            root: NoteNode::Directory {
                name: "/".to_string(),
                path: String::new(),
                children,
            },
        };
        log::debug!(
            "NoteTree: scanned {} notes under {}",
            tree.file_count(),
            root.display()
        );
        Ok(tree)
    }

    /// Build a tree from already constructed top-level nodes.
    pub fn from_children(mut children: Vec<NoteNode>) -> Self {
        children.sort_by(compare_nodes);
        Self {
            root: NoteNode::Directory {
                name: "/".to_string(),
                path: String::new(),
                children,
            },
        }
    }

    /// Paths of all notes, depth-first in display order.
    pub fn files(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.root.collect_files(&mut out);
        out
    }

    /// Number of notes in the tree.
    pub fn file_count(&self) -> usize {
        self.files().len()
    }

    /// Find a node by workspace-relative path.
    pub fn find(&self, path: &str) -> Option<&NoteNode> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Some(&self.root);
        }
        let mut node = &self.root;
        for part in path.split('/') {
            node = node.children().iter().find(|c| c.name() == part)?;
        }
        Some(node)
    }
}

fn scan_dir(dir: &Path, rel: &str, options: &ScanOptions) -> Result<Vec<NoteNode>> {
    let mut children = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if options.skips(&name) {
            continue;
        }
        let path = if rel.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", rel, name)
        };

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            match scan_dir(&entry.path(), &path, options) {
                Ok(sub) => children.push(NoteNode::Directory {
                    name,
                    path,
                    children: sub,
                }),
                Err(e) => log::warn!("Skipping unreadable directory {}: {}", path, e),
            }
        } else if file_type.is_file() && options.accepts(&name) {
            children.push(NoteNode::File { name, path });
        }
    }

    children.sort_by(compare_nodes);
    Ok(children)
}
