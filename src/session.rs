//! Editor session state for a single open note.
//!
//! The session owns the edit buffer and decides what has to happen on save,
//! refresh and note switches. It never prompts or schedules anything itself:
//! the host shows dialogs and drives the clock.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::render::HtmlRenderer;
use crate::workspace::{NoteMeta, NoteStore, NEW_NOTE_TEMPLATE};

/// Which pane the editor shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Rendered HTML
    #[default]
    Render,
    /// Raw Markdown source
    Edit,
}

impl ViewMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Render => ViewMode::Edit,
            ViewMode::Edit => ViewMode::Render,
        }
    }
}

/// Result of checking the open note against storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No note is open
    NoNote,
    /// The file has not changed since it was loaded or saved
    Unchanged,
    /// The file changed on disk and the buffer was clean, so it was reloaded
    Reloaded,
    /// The file changed on disk while the buffer has unsaved edits
    Conflict,
}

/// How to settle a [`RefreshOutcome::Conflict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Write the buffer over the file on disk
    KeepLocal,
    /// Drop the buffer and load the file from disk
    TakeDisk,
}

/// What the host should do before leaving the current note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchDecision {
    /// Nothing unsaved, go ahead
    Proceed,
    /// Unsaved edits: ask whether to save first
    PromptSave,
}

/// Periodic autosave policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSavePolicy {
    /// Minimum time between saves
    pub interval: Duration,
}

impl AutoSavePolicy {
    /// Create a policy with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Set the interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Check whether a save is due at `now` given the last save time.
    pub fn is_due(&self, last_save: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        (now - last_save)
            .to_std()
            .map(|elapsed| elapsed >= self.interval)
            .unwrap_or(false)
    }
}

impl Default for AutoSavePolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5 * 60),
        }
    }
}

/// The note currently open in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenNote {
    /// Workspace-relative path
    pub path: String,

    /// File name shown to the user
    pub name: String,

    /// Modification time seen at the last load or save
    pub last_known_modified: DateTime<Utc>,
}

/// Editing state for one note at a time.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    note: Option<OpenNote>,
    text: String,
    dirty: bool,
    view_mode: ViewMode,
    last_saved: Option<DateTime<Utc>>,
}

impl EditorSession {
    /// Create a session with no note open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a note into the buffer and clear the dirty flag.
    ///
    /// Does not check for unsaved edits; see [`EditorSession::switch_decision`].
    pub fn open(&mut self, store: &dyn NoteStore, path: &str) -> Result<()> {
        let content = store.read(path)?;
        let name = path.rsplit('/').next().unwrap_or(path).to_string();

        self.note = Some(OpenNote {
            path: path.to_string(),
            name,
            last_known_modified: content.modified,
        });
        self.text = content.content;
        self.dirty = false;
        self.last_saved = Some(content.modified);
        log::debug!("Opened {}", path);
        Ok(())
    }

    /// Create a note from the default template in `dir` and open it.
    pub fn create_and_open(&mut self, store: &dyn NoteStore, dir: &str, name: &str) -> Result<String> {
        let path = store.create(dir, name, NEW_NOTE_TEMPLATE)?;
        self.open(store, &path)?;
        Ok(path)
    }

    /// Forget the open note and its buffer.
    pub fn close(&mut self) {
        self.note = None;
        self.text.clear();
        self.dirty = false;
        self.last_saved = None;
    }

    /// The open note, if any.
    pub fn note(&self) -> Option<&OpenNote> {
        self.note.as_ref()
    }

    /// Path of the open note, if any.
    pub fn current_path(&self) -> Option<&str> {
        self.note.as_ref().map(|n| n.path.as_str())
    }

    /// Current buffer text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the buffer with edited text and mark it dirty.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    /// Check if the buffer has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Check if saving would do anything.
    pub fn can_save(&self) -> bool {
        self.note.is_some() && self.dirty
    }

    /// Write the buffer to the open note.
    pub fn save(&mut self, store: &dyn NoteStore) -> Result<NoteMeta> {
        let note = self.note.as_mut().ok_or(Error::NoOpenNote)?;
        let meta = store.write(&note.path, &self.text)?;
        note.last_known_modified = meta.modified;
        self.dirty = false;
        self.last_saved = Some(meta.modified);
        Ok(meta)
    }

    /// Drop unsaved edits by reloading the note from storage.
    pub fn discard_changes(&mut self, store: &dyn NoteStore) -> Result<()> {
        let path = self.current_path().ok_or(Error::NoOpenNote)?.to_string();
        self.open(store, &path)
    }

    /// Compare the open note against storage.
    ///
    /// A clean buffer is reloaded silently when the file changed on disk; a
    /// dirty one is left alone and reported as a conflict.
    pub fn refresh(&mut self, store: &dyn NoteStore) -> Result<RefreshOutcome> {
        let Some(note) = self.note.as_ref() else {
            return Ok(RefreshOutcome::NoNote);
        };

        let modified = store.modified(&note.path)?;
        if modified == note.last_known_modified {
            return Ok(RefreshOutcome::Unchanged);
        }

        if self.dirty {
            log::debug!("{} changed on disk while the buffer is dirty", note.path);
            return Ok(RefreshOutcome::Conflict);
        }

        let path = note.path.clone();
        self.open(store, &path)?;
        Ok(RefreshOutcome::Reloaded)
    }

    /// Settle a refresh conflict.
    pub fn resolve_conflict(&mut self, store: &dyn NoteStore, choice: ConflictChoice) -> Result<()> {
        match choice {
            ConflictChoice::KeepLocal => self.save(store).map(|_| ()),
            ConflictChoice::TakeDisk => self.discard_changes(store),
        }
    }

    /// Decide whether leaving the current note needs a save prompt.
    pub fn switch_decision(&self) -> SwitchDecision {
        if self.dirty {
            SwitchDecision::PromptSave
        } else {
            SwitchDecision::Proceed
        }
    }

    /// Save when the buffer is dirty and the policy interval has elapsed.
    ///
    /// `now` comes from the host clock. The interval is measured from the
    /// store timestamp of the last load or save, or from the `now` of the
    /// last autosave. Returns whether a save happened.
    pub fn autosave(
        &mut self,
        store: &dyn NoteStore,
        policy: &AutoSavePolicy,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        if !self.can_save() {
            return Ok(false);
        }
        let due = self
            .last_saved
            .map_or(true, |last| policy.is_due(last, now));
        if !due {
            return Ok(false);
        }
        self.save(store)?;
        self.last_saved = Some(now);
        Ok(true)
    }

    /// Current view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch between render and edit view, returning the new mode.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    /// Render the buffer to HTML.
    pub fn rendered_html(&self, renderer: &HtmlRenderer) -> String {
        renderer.render(&self.text)
    }

    /// Number of lines in the buffer; an empty buffer counts as one line.
    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            1
        } else {
            self.text.split('\n').count()
        }
    }

    /// Editor gutter text: `1\n2\n...` up to the line count.
    pub fn line_numbers(&self) -> String {
        let mut gutter = String::new();
        for n in 1..=self.line_count() {
            gutter.push_str(&n.to_string());
            gutter.push('\n');
        }
        gutter
    }

    /// Status bar text: the note name, marked when unsaved.
    pub fn status_line(&self) -> String {
        match &self.note {
            Some(note) if self.dirty => format!("{} (unsaved)", note.name),
            Some(note) => note.name.clone(),
            None => "No note open".to_string(),
        }
    }
}
