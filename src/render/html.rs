//! HTML rendering for Markdown notes.

use crate::model::{Block, Document, Table};
use crate::parser;

use super::escape::escape_html;
use super::inline::{render_inline, InlineOptions};
use super::{RenderOptions, RenderResult, RenderStats};

/// Convert Markdown text to an HTML fragment with default options.
///
/// Empty input yields an empty string; no input ever fails.
pub fn to_html(text: &str) -> String {
    HtmlRenderer::default().render(text)
}

/// Convert Markdown text to HTML with statistics.
pub fn to_html_with_stats(text: &str, options: &RenderOptions) -> RenderResult {
    let mut options = options.clone();
    options.collect_stats = true;
    HtmlRenderer::new(options).render_with_stats(text)
}

/// Markdown to HTML renderer.
///
/// Holds only options, so one renderer can be shared across threads and
/// reused for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Get the renderer options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render Markdown text to HTML.
    pub fn render(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let doc = parser::parse(text);
        self.render_document(&doc)
    }

    /// Render Markdown text to HTML with statistics.
    ///
    /// Statistics stay zeroed unless `collect_stats` is set.
    pub fn render_with_stats(&self, text: &str) -> RenderResult {
        let doc = parser::parse(text);
        let html = if text.is_empty() {
            String::new()
        } else {
            self.render_document(&doc)
        };

        if !self.options.collect_stats {
            let mut result = RenderResult::html_only(html);
            result.title = doc.title().map(str::to_string);
            return result;
        }

        let mut stats = RenderStats::from_document(&doc);
        stats.count_text(text);

        RenderResult::new(html, doc.title().map(str::to_string), stats)
    }

    /// Render an already parsed document.
    pub fn render_document(&self, doc: &Document) -> String {
        let inline = self.options.inline();
        let mut fragments: Vec<String> = Vec::with_capacity(doc.blocks.len());
        for block in &doc.blocks {
            self.render_block(&mut fragments, block, &inline);
        }
        let body = fragments.join("\n");

        if self.options.standalone {
            let title = self
                .options
                .title
                .as_deref()
                .or_else(|| doc.title())
                .unwrap_or("Untitled");
            return wrap_page(title, &body);
        }
        body
    }

    fn render_block(&self, out: &mut Vec<String>, block: &Block, inline: &InlineOptions) {
        match block {
            Block::Blank => out.push(String::new()),
            Block::CodeBlock { language, code } => {
                out.push(self.render_code_block(code, language.as_deref()));
            }
            Block::Heading { level, text } => {
                out.push(format!(
                    "<h{level}>{}</h{level}>",
                    render_inline(text, inline),
                    level = level
                ));
            }
            Block::HorizontalRule => out.push("<hr />".to_string()),
            Block::Table(table) => out.push(self.render_table(table, inline)),
            Block::List { items } => {
                if items.is_empty() {
                    return;
                }
                out.push("<ul>".to_string());
                for item in items {
                    out.push(format!("<li>{}</li>", render_inline(item, inline)));
                }
                out.push("</ul>".to_string());
            }
            Block::Paragraph { text } => {
                out.push(format!("<p>{}</p>", render_inline(text, inline)));
            }
        }
    }

    fn render_code_block(&self, code: &str, language: Option<&str>) -> String {
        let mut output = String::from("<div class=\"codeblock\">");

        if self.options.line_numbers {
            let count = code.split('\n').count().max(1);
            output.push_str("<div class=\"code-nums\">");
            for n in 1..=count {
                output.push_str(&n.to_string());
                output.push('\n');
            }
            output.push_str("</div>");
        }

        output.push_str("<pre><code");
        if let Some(lang) = language {
            output.push_str(&format!(
                " class=\"{}{}\"",
                escape_html(&self.options.code_class_prefix),
                escape_html(lang)
            ));
        }
        output.push('>');
        output.push_str(&escape_html(code));
        output.push_str("</code></pre></div>");
        output
    }

    fn render_table(&self, table: &Table, inline: &InlineOptions) -> String {
        let mut output = String::from("<table");
        if !self.options.table_class.is_empty() {
            output.push_str(&format!(
                " class=\"{}\"",
                escape_html(&self.options.table_class)
            ));
        }
        output.push_str("><thead><tr>");
        for (i, cell) in table.header.cells.iter().enumerate() {
            output.push_str(&format!(
                "<th style=\"text-align:{}\">{}</th>",
                table.alignment(i).as_css(),
                render_inline(cell, inline)
            ));
        }
        output.push_str("</tr></thead><tbody>");

        for row in &table.rows {
            output.push_str("<tr>");
            for (i, cell) in row.cells.iter().enumerate() {
                output.push_str(&format!(
                    "<td style=\"text-align:{}\">{}</td>",
                    table.alignment(i).as_css(),
                    render_inline(cell, inline)
                ));
            }
            output.push_str("</tr>");
        }

        output.push_str("</tbody></table>");
        output
    }
}

fn wrap_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<article class=\"markdown-body\">\n{}\n</article>\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}
