//! Rendering options and configuration.

use super::inline::InlineOptions;

/// Options for rendering Markdown to HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit the line-number gutter next to fenced code
    pub line_numbers: bool,

    /// Class prefix for the language tag of fenced code (e.g., "lang-")
    pub code_class_prefix: String,

    /// Class attribute for tables (empty = no class)
    pub table_class: String,

    /// Open links in a new browsing context without referrer or opener
    pub links_new_tab: bool,

    /// Wrap the fragment in a complete HTML page
    pub standalone: bool,

    /// Page title for standalone output (falls back to the first H1)
    pub title: Option<String>,

    /// Collect block statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the code line-number gutter.
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    /// Set the language class prefix for fenced code.
    pub fn with_code_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.code_class_prefix = prefix.into();
        self
    }

    /// Set the table class attribute.
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }

    /// Enable or disable opening links in a new tab.
    pub fn with_links_new_tab(mut self, new_tab: bool) -> Self {
        self.links_new_tab = new_tab;
        self
    }

    /// Enable or disable standalone page output.
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set the page title used in standalone output.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    pub(crate) fn inline(&self) -> InlineOptions {
        InlineOptions {
            links_new_tab: self.links_new_tab,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: true,
            code_class_prefix: "lang-".to_string(),
            table_class: "md-table".to_string(),
            links_new_tab: true,
            standalone: false,
            title: None,
            collect_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_line_numbers(false)
            .with_standalone(true)
            .with_title("Notes")
            .with_table_class("");

        assert!(!options.line_numbers);
        assert!(options.standalone);
        assert_eq!(options.title.as_deref(), Some("Notes"));
        assert!(options.table_class.is_empty());
        assert!(options.links_new_tab);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert!(options.line_numbers);
        assert_eq!(options.code_class_prefix, "lang-");
        assert_eq!(options.table_class, "md-table");
        assert!(!options.collect_stats);
    }
}
