//! Parallel export of every note in a workspace to HTML.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::parser;
use crate::render::{HtmlRenderer, RenderOptions, RenderStats};

use super::tree::ScanOptions;
use super::NoteStore;

/// Outcome of a workspace export.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Files written, relative to the output directory
    pub exported: Vec<PathBuf>,

    /// Notes that failed, with the error message
    pub failed: Vec<(String, String)>,

    /// Combined statistics of all exported notes
    pub stats: RenderStats,
}

impl ExportReport {
    /// Check if every note was exported.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Output path of a note: its extension replaced by `.html`.
pub fn html_path_for(note: &str) -> PathBuf {
    PathBuf::from(note).with_extension("html")
}

/// Render every note of `store` into standalone HTML pages under `out_dir`.
pub fn export_workspace(
    store: &dyn NoteStore,
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<ExportReport> {
    export_workspace_with(store, out_dir, options, |_| {})
}

/// Like [`export_workspace`], calling `on_note` after each note is handled.
///
/// Notes whose output paths collide (`a.md` and `a.markdown`) are exported
/// once: the first note in tree order wins and the others are reported as
/// failed.
pub fn export_workspace_with<F>(
    store: &dyn NoteStore,
    out_dir: &Path,
    options: &RenderOptions,
    on_note: F,
) -> Result<ExportReport>
where
    F: Fn(&str) + Sync,
{
    let tree = store.scan(&ScanOptions::default())?;
    let notes = tree.files();
    fs::create_dir_all(out_dir)?;

    let mut report = ExportReport::default();
    let mut targets: HashMap<PathBuf, &str> = HashMap::with_capacity(notes.len());
    let mut pending: Vec<&str> = Vec::with_capacity(notes.len());
    for note in notes {
        match targets.entry(html_path_for(note)) {
            Entry::Vacant(slot) => {
                slot.insert(note);
                pending.push(note);
            }
            Entry::Occupied(slot) => {
                let message = format!(
                    "output {} is already taken by {}",
                    slot.key().display(),
                    slot.get()
                );
                log::warn!("Skipping {}: {}", note, message);
                report.failed.push((note.to_string(), message));
                on_note(note);
            }
        }
    }

    let results: Vec<(&str, Result<(PathBuf, RenderStats)>)> = pending
        .par_iter()
        .map(|note| {
            let result = export_note(store, options, out_dir, note);
            on_note(note);
            (*note, result)
        })
        .collect();

    for (note, result) in results {
        match result {
            Ok((path, stats)) => {
                report.stats.merge(&stats);
                report.exported.push(path);
            }
            Err(e) => {
                log::warn!("Failed to export {}: {}", note, e);
                report.failed.push((note.to_string(), e.to_string()));
            }
        }
    }

    log::info!(
        "Exported {} notes to {} ({} failed)",
        report.exported.len(),
        out_dir.display(),
        report.failed.len()
    );
    Ok(report)
}

fn export_note(
    store: &dyn NoteStore,
    options: &RenderOptions,
    out_dir: &Path,
    note: &str,
) -> Result<(PathBuf, RenderStats)> {
    let content = store.read(note)?;
    let doc = parser::parse(&content.content);

    // Untitled notes are named after their file.
    let title = options
        .title
        .clone()
        .or_else(|| doc.title().map(str::to_string))
        .unwrap_or_else(|| note_stem(note));
    let renderer = HtmlRenderer::new(options.clone().with_standalone(true).with_title(title));
    let html = renderer.render_document(&doc);

    let mut stats = RenderStats::from_document(&doc);
    stats.count_text(&content.content);

    let rel = html_path_for(note);
    let target = out_dir.join(&rel);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, html)?;
    Ok((rel, stats))
}

fn note_stem(note: &str) -> String {
    Path::new(note)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| note.to_string())
}
