//! # marknote
//!
//! Core of a local Markdown note editor.
//!
//! The centre of the crate is a small, dependency-light Markdown-to-HTML
//! renderer covering the subset notes actually use: headings, paragraphs,
//! unordered lists, fenced code with a line-number gutter, horizontal rules,
//! GitHub-style tables and inline code/bold/italic/links. Around it sit a
//! note workspace (scan, read, write, create, export) and the editor session
//! state (dirty tracking, external-change detection, autosave policy).
//!
//! ## Quick Start
//!
//! ```
//! let html = marknote::render_markdown("# Hello\n\nSome **bold** text.");
//! assert_eq!(html, "<h1>Hello</h1>\n\n<p>Some <strong>bold</strong> text.</p>");
//! ```
//!
//! ## Features
//!
//! - **Total renderer**: every input string renders; malformed markup degrades
//!   to paragraphs instead of failing
//! - **Escaping first**: all user text is HTML-escaped before markup is added
//! - **Note workspace**: directory tree of `.md`/`.markdown` files
//! - **Parallel export**: render a whole workspace with Rayon
//! - **Editor session**: dirty flag, conflict detection, autosave policy

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;
pub mod workspace;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Alignment, Block, Document, Table, TableRow};
pub use parser::{parse, BlockParser, LineKind};
pub use render::{
    to_html, to_html_with_stats, to_json, HtmlRenderer, JsonFormat, RenderOptions, RenderResult,
    RenderStats,
};
pub use session::{
    AutoSavePolicy, ConflictChoice, EditorSession, OpenNote, RefreshOutcome, SwitchDecision,
    ViewMode,
};
pub use workspace::{
    export_workspace, FsNoteStore, NoteContent, NoteMeta, NoteNode, NoteStore, NoteTree,
    ScanOptions,
};

use std::path::Path;

/// Render Markdown text to an HTML fragment.
///
/// Empty input yields an empty string.
///
/// # Example
///
/// ```
/// let html = marknote::render_markdown("- a\n- b\n\nc");
/// assert_eq!(html, "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n\n<p>c</p>");
/// ```
pub fn render_markdown(text: &str) -> String {
    render::to_html(text)
}

/// Render possibly absent Markdown text; `None` yields an empty string.
pub fn render_markdown_opt(text: Option<&str>) -> String {
    text.map(render_markdown).unwrap_or_default()
}

/// Render Markdown text with custom options.
///
/// # Example
///
/// ```
/// use marknote::{render_markdown_with_options, RenderOptions};
///
/// let options = RenderOptions::new().with_line_numbers(false);
/// let html = render_markdown_with_options("```\nx\n```", &options);
/// assert_eq!(html, "<div class=\"codeblock\"><pre><code>x</code></pre></div>");
/// ```
pub fn render_markdown_with_options(text: &str, options: &RenderOptions) -> String {
    HtmlRenderer::new(options.clone()).render(text)
}

/// Read a Markdown file and render it to HTML.
///
/// # Example
///
/// ```no_run
/// use marknote::{render_file, RenderOptions};
///
/// let html = render_file("notes/todo.md", &RenderOptions::default()).unwrap();
/// println!("{}", html);
/// ```
pub fn render_file<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    log::debug!("Rendering {} ({} bytes)", path.display(), text.len());
    Ok(render_markdown_with_options(&text, options))
}
