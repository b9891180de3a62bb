//! Integration tests for the note workspace.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use marknote::workspace::{export_workspace_with, NEW_NOTE_TEMPLATE};
use marknote::{
    export_workspace, Error, FsNoteStore, NoteNode, NoteStore, RenderOptions, ScanOptions,
};
use tempfile::TempDir;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("projects/archive")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();

    write(root, "b.md", "# Bee\n\nbody");
    write(root, "A.md", "alpha");
    write(root, "c.markdown", "- one\n- two");
    write(root, "image.png", "not a note");
    write(root, ".hidden.md", "secret");
    write(root, ".git/HEAD.md", "ref");
    write(root, "projects/plan.md", "# Plan\n\n```\nx\n```");
    write(root, "projects/archive/old.md", "a|b\n---|---\n1|2");
    dir
}

fn write(root: &Path, rel: &str, content: &str) {
    fs::write(root.join(rel), content).unwrap();
}

#[test]
fn test_open_requires_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("note.md");
    fs::write(&file, "x").unwrap();

    assert!(FsNoteStore::open(dir.path()).is_ok());
    assert!(matches!(FsNoteStore::open(&file), Err(Error::Io(_))));
}

#[test]
fn test_scan_order_and_filtering() {
    let dir = workspace();
    let store = FsNoteStore::open(dir.path()).unwrap();
    let tree = store.scan(&ScanOptions::default()).unwrap();

    let top: Vec<_> = tree.root.children().iter().map(NoteNode::name).collect();
    assert_eq!(top, vec!["empty", "projects", "A.md", "b.md", "c.markdown"]);

    assert_eq!(
        tree.files(),
        vec![
            "projects/archive/old.md",
            "projects/plan.md",
            "A.md",
            "b.md",
            "c.markdown",
        ]
    );
    assert!(tree.find("projects/archive").unwrap().is_dir());
    assert!(tree.find("image.png").is_none());
}

#[test]
fn test_scan_hidden_and_custom_extensions() {
    let dir = workspace();
    let store = FsNoteStore::open(dir.path()).unwrap();

    let tree = store.scan(&ScanOptions::new().with_hidden(true)).unwrap();
    assert!(tree.find(".hidden.md").is_some());
    assert!(tree.find(".git/HEAD.md").is_some());

    let tree = store
        .scan(&ScanOptions::new().with_extensions([".png"]))
        .unwrap();
    assert_eq!(tree.files(), vec!["image.png"]);
}

#[test]
fn test_tree_json_shape() {
    let dir = workspace();
    let store = FsNoteStore::open(dir.path()).unwrap();
    let tree = store.scan(&ScanOptions::default()).unwrap();

    let json = marknote::to_json(&tree, marknote::JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["root"]["type"], "directory");
    assert_eq!(value["root"]["children"][2]["type"], "file");
    assert_eq!(value["root"]["children"][2]["path"], "A.md");
}

#[test]
fn test_read_and_write() {
    let dir = workspace();
    let store = FsNoteStore::open(dir.path()).unwrap();

    let note = store.read("projects/plan.md").unwrap();
    assert!(note.content.starts_with("# Plan"));
    assert_eq!(note.size, note.content.len() as u64);

    let meta = store.write("projects/plan.md", "updated").unwrap();
    assert_eq!(meta.size, 7);
    assert_eq!(store.read("projects/plan.md").unwrap().content, "updated");
    assert_eq!(store.modified("projects/plan.md").unwrap(), meta.modified);
}

#[test]
fn test_rejects_non_markdown_and_escaping_paths() {
    let dir = workspace();
    let store = FsNoteStore::open(dir.path()).unwrap();

    assert!(matches!(store.read("image.png"), Err(Error::NotMarkdown(_))));
    assert!(matches!(
        store.write("../outside.md", "x"),
        Err(Error::OutsideWorkspace(_))
    ));
    assert!(matches!(store.read("missing.md"), Err(Error::Io(_))));
}

#[test]
fn test_create_note() {
    let dir = workspace();
    let store = FsNoteStore::open(dir.path()).unwrap();

    let path = store.create("projects", "ideas", NEW_NOTE_TEMPLATE).unwrap();
    assert_eq!(path, "projects/ideas.md");
    assert_eq!(store.read(&path).unwrap().content, NEW_NOTE_TEMPLATE);

    let path = store.create("", "root.markdown", "").unwrap();
    assert_eq!(path, "root.markdown");
}

#[test]
fn test_create_never_overwrites() {
    let dir = workspace();
    let store = FsNoteStore::open(dir.path()).unwrap();

    let err = store.create("", "b", NEW_NOTE_TEMPLATE).unwrap_err();
    assert!(matches!(err, Error::NoteExists(_)));
    assert_eq!(store.read("b.md").unwrap().content, "# Bee\n\nbody");
}

#[test]
fn test_create_invalid_names() {
    let dir = workspace();
    let store = FsNoteStore::open(dir.path()).unwrap();

    for name in ["", "  ", "a/b", "..", "tab\there"] {
        assert!(
            matches!(store.create("", name, ""), Err(Error::InvalidNoteName(_))),
            "name {:?}",
            name
        );
    }
    assert!(matches!(
        store.create("../elsewhere", "x", ""),
        Err(Error::OutsideWorkspace(_))
    ));
}

#[test]
fn test_export_workspace() {
    let dir = workspace();
    let out = tempfile::tempdir().unwrap();
    let store = FsNoteStore::open(dir.path()).unwrap();

    let report = export_workspace(&store, out.path(), &RenderOptions::default()).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.exported.len(), 5);
    assert_eq!(report.stats.table_count, 1);
    assert_eq!(report.stats.code_block_count, 1);

    let plan = fs::read_to_string(out.path().join("projects/plan.html")).unwrap();
    assert!(plan.starts_with("<!DOCTYPE html>"));
    assert!(plan.contains("<title>Plan</title>"));

    // no H1: titled after the file
    let alpha = fs::read_to_string(out.path().join("A.html")).unwrap();
    assert!(alpha.contains("<title>A</title>"));
    assert!(out.path().join("c.html").exists());
    assert!(!out.path().join("image.html").exists());
}

#[test]
fn test_export_reports_progress() {
    let dir = workspace();
    let out = tempfile::tempdir().unwrap();
    let store = FsNoteStore::open(dir.path()).unwrap();
    let seen = AtomicUsize::new(0);

    let report = export_workspace_with(&store, out.path(), &RenderOptions::default(), |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), report.exported.len());
}

#[test]
fn test_export_colliding_outputs() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.md", "# From md");
    write(dir.path(), "a.markdown", "# From markdown");
    let out = tempfile::tempdir().unwrap();
    let store = FsNoteStore::open(dir.path()).unwrap();
    let seen = AtomicUsize::new(0);

    let report = export_workspace_with(&store, out.path(), &RenderOptions::default(), |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    // "a.markdown" sorts first and keeps a.html
    assert!(!report.is_complete());
    assert_eq!(report.exported, vec![Path::new("a.html").to_path_buf()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "a.md");
    assert!(report.failed[0].1.contains("a.markdown"));
    assert_eq!(seen.load(Ordering::SeqCst), 2);

    let html = fs::read_to_string(out.path().join("a.html")).unwrap();
    assert!(html.contains("<h1>From markdown</h1>"));
}
