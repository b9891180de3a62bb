//! Rendering module for converting parsed notes to HTML and JSON.

mod escape;
mod html;
mod inline;
mod json;
mod options;
mod result;

pub use escape::escape_html;
pub use html::{to_html, to_html_with_stats, HtmlRenderer};
pub use inline::{render_inline, InlineOptions};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use result::{RenderResult, RenderStats};
