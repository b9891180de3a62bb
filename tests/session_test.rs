//! Integration tests for the editor session.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use marknote::error::Result;
use marknote::{
    AutoSavePolicy, ConflictChoice, EditorSession, Error, HtmlRenderer, NoteContent, NoteMeta,
    NoteNode, NoteStore, NoteTree, RefreshOutcome, ScanOptions, SwitchDecision, ViewMode,
};

/// In-memory store with a manual clock for modification times.
struct MemoryStore {
    notes: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
    clock: Mutex<DateTime<Utc>>,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            notes: Mutex::new(HashMap::new()),
            clock: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    fn with_note(self, path: &str, content: &str) -> Self {
        self.external_edit(path, content);
        self
    }

    fn tick(&self) -> DateTime<Utc> {
        let mut clock = self.clock.lock().unwrap();
        *clock += Duration::seconds(1);
        *clock
    }

    /// Simulate another program changing a note.
    fn external_edit(&self, path: &str, content: &str) {
        let now = self.tick();
        self.notes
            .lock()
            .unwrap()
            .insert(path.to_string(), (content.to_string(), now));
    }

    fn content(&self, path: &str) -> String {
        self.notes.lock().unwrap()[path].0.clone()
    }
}

impl NoteStore for MemoryStore {
    fn scan(&self, _options: &ScanOptions) -> Result<NoteTree> {
        let notes = self.notes.lock().unwrap();
        let children = notes
            .keys()
            .map(|path| NoteNode::File {
                name: path.clone(),
                path: path.clone(),
            })
            .collect();
        Ok(NoteTree::from_children(children))
    }

    fn read(&self, path: &str) -> Result<NoteContent> {
        let notes = self.notes.lock().unwrap();
        let (content, modified) = notes
            .get(path)
            .ok_or_else(|| Error::Other(format!("no such note: {}", path)))?;
        Ok(NoteContent {
            content: content.clone(),
            modified: *modified,
            size: content.len() as u64,
        })
    }

    fn write(&self, path: &str, content: &str) -> Result<NoteMeta> {
        let now = self.tick();
        self.notes
            .lock()
            .unwrap()
            .insert(path.to_string(), (content.to_string(), now));
        Ok(NoteMeta {
            modified: now,
            size: content.len() as u64,
        })
    }

    fn create(&self, dir: &str, name: &str, initial: &str) -> Result<String> {
        let file = marknote::workspace::normalize_note_name(name)?;
        let path = if dir.is_empty() {
            file
        } else {
            format!("{}/{}", dir, file)
        };
        if self.notes.lock().unwrap().contains_key(&path) {
            return Err(Error::NoteExists(PathBuf::from(path)));
        }
        self.write(&path, initial)?;
        Ok(path)
    }

    fn modified(&self, path: &str) -> Result<DateTime<Utc>> {
        Ok(self.read(path)?.modified)
    }
}

#[test]
fn test_open_and_edit() {
    let store = MemoryStore::new().with_note("dir/todo.md", "# Todo");
    let mut session = EditorSession::new();

    session.open(&store, "dir/todo.md").unwrap();
    assert_eq!(session.text(), "# Todo");
    assert_eq!(session.current_path(), Some("dir/todo.md"));
    assert_eq!(session.status_line(), "todo.md");
    assert!(!session.is_dirty());
    assert!(!session.can_save());

    session.set_text("# Todo\n\n- milk");
    assert!(session.is_dirty());
    assert!(session.can_save());
    assert_eq!(session.status_line(), "todo.md (unsaved)");
    assert_eq!(session.switch_decision(), SwitchDecision::PromptSave);
}

#[test]
fn test_save_clears_dirty() {
    let store = MemoryStore::new().with_note("a.md", "old");
    let mut session = EditorSession::new();
    session.open(&store, "a.md").unwrap();

    session.set_text("new");
    let meta = session.save(&store).unwrap();
    assert_eq!(meta.size, 3);
    assert_eq!(store.content("a.md"), "new");
    assert!(!session.is_dirty());
    assert_eq!(session.switch_decision(), SwitchDecision::Proceed);
    assert_eq!(session.refresh(&store).unwrap(), RefreshOutcome::Unchanged);
}

#[test]
fn test_save_without_note_fails() {
    let store = MemoryStore::new();
    let mut session = EditorSession::new();
    session.set_text("orphan");
    assert!(matches!(session.save(&store), Err(Error::NoOpenNote)));
    assert!(matches!(
        session.discard_changes(&store),
        Err(Error::NoOpenNote)
    ));
}

#[test]
fn test_refresh_reloads_clean_buffer() {
    let store = MemoryStore::new().with_note("a.md", "v1");
    let mut session = EditorSession::new();
    assert_eq!(session.refresh(&store).unwrap(), RefreshOutcome::NoNote);

    session.open(&store, "a.md").unwrap();
    assert_eq!(session.refresh(&store).unwrap(), RefreshOutcome::Unchanged);

    store.external_edit("a.md", "v2");
    assert_eq!(session.refresh(&store).unwrap(), RefreshOutcome::Reloaded);
    assert_eq!(session.text(), "v2");
    assert_eq!(session.refresh(&store).unwrap(), RefreshOutcome::Unchanged);
}

#[test]
fn test_refresh_conflict_keep_local() {
    let store = MemoryStore::new().with_note("a.md", "v1");
    let mut session = EditorSession::new();
    session.open(&store, "a.md").unwrap();

    session.set_text("mine");
    store.external_edit("a.md", "theirs");
    assert_eq!(session.refresh(&store).unwrap(), RefreshOutcome::Conflict);
    assert_eq!(session.text(), "mine");

    session
        .resolve_conflict(&store, ConflictChoice::KeepLocal)
        .unwrap();
    assert_eq!(store.content("a.md"), "mine");
    assert!(!session.is_dirty());
    assert_eq!(session.refresh(&store).unwrap(), RefreshOutcome::Unchanged);
}

#[test]
fn test_refresh_conflict_take_disk() {
    let store = MemoryStore::new().with_note("a.md", "v1");
    let mut session = EditorSession::new();
    session.open(&store, "a.md").unwrap();

    session.set_text("mine");
    store.external_edit("a.md", "theirs");
    assert_eq!(session.refresh(&store).unwrap(), RefreshOutcome::Conflict);

    session
        .resolve_conflict(&store, ConflictChoice::TakeDisk)
        .unwrap();
    assert_eq!(session.text(), "theirs");
    assert!(!session.is_dirty());
}

#[test]
fn test_create_and_open() {
    let store = MemoryStore::new();
    let mut session = EditorSession::new();

    let path = session.create_and_open(&store, "", "Ideas").unwrap();
    assert_eq!(path, "Ideas.md");
    assert_eq!(session.text(), marknote::workspace::NEW_NOTE_TEMPLATE);
    assert!(!session.is_dirty());

    assert!(matches!(
        session.create_and_open(&store, "", "Ideas.md"),
        Err(Error::NoteExists(_))
    ));
    assert_eq!(store.scan(&ScanOptions::default()).unwrap().file_count(), 1);
}

#[test]
fn test_autosave() {
    let store = MemoryStore::new().with_note("a.md", "v1");
    let policy = AutoSavePolicy::default().with_interval(std::time::Duration::from_secs(60));
    let mut session = EditorSession::new();
    session.open(&store, "a.md").unwrap();
    let opened = session.note().unwrap().last_known_modified;

    // clean buffer: nothing to save
    assert!(!session.autosave(&store, &policy, opened + Duration::hours(1)).unwrap());

    session.set_text("draft");
    assert!(!session
        .autosave(&store, &policy, opened + Duration::seconds(30))
        .unwrap());
    assert!(session
        .autosave(&store, &policy, opened + Duration::seconds(120))
        .unwrap());
    assert_eq!(store.content("a.md"), "draft");
    assert!(!session.is_dirty());
}

#[test]
fn test_autosave_follows_host_clock() {
    let host_clock = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let store = MemoryStore::new().with_note("a.md", "v1");
    let policy = AutoSavePolicy::default();
    let mut session = EditorSession::new();
    session.open(&store, "a.md").unwrap();

    session.set_text("draft");
    assert!(session
        .autosave(&store, &policy, host_clock + Duration::days(1))
        .unwrap());
    assert_eq!(store.content("a.md"), "draft");

    // interval restarts at the autosave time
    session.set_text("draft 2");
    assert!(!session
        .autosave(&store, &policy, host_clock + Duration::days(1) + Duration::minutes(1))
        .unwrap());
    assert!(session
        .autosave(&store, &policy, host_clock + Duration::days(1) + Duration::minutes(5))
        .unwrap());
    assert_eq!(store.content("a.md"), "draft 2");
}

#[test]
fn test_view_and_render() {
    let store = MemoryStore::new().with_note("a.md", "# A\n\n**b**");
    let mut session = EditorSession::new();
    session.open(&store, "a.md").unwrap();

    assert_eq!(session.view_mode(), ViewMode::Render);
    assert_eq!(
        session.rendered_html(&HtmlRenderer::default()),
        "<h1>A</h1>\n\n<p><strong>b</strong></p>"
    );
    assert_eq!(session.line_numbers(), "1\n2\n3\n");
    assert_eq!(session.toggle_view(), ViewMode::Edit);

    session.close();
    assert_eq!(session.current_path(), None);
    assert_eq!(session.text(), "");
    assert_eq!(session.status_line(), "No note open");
}
