//! Parser extension and HTML output configuration

use pulldown_cmark::Options;

/// Optional Markdown grammar features recognised when parsing
///
/// The same value must be used for rendering and for heading extraction so
/// that anchors in the preview match anchors in the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extensions {
    /// GitHub-style pipe tables
    pub tables: bool,

    /// Fenced code blocks; when disabled, fences are shown as literal text
    pub fenced_code: bool,

    /// `~~strikethrough~~` spans
    pub strikethrough: bool,

    /// Assign an `id` derived from the heading text to every heading
    pub auto_heading_ids: bool,

    /// Blocks may start without a preceding blank line.
    /// pulldown-cmark follows CommonMark here, which always allows it.
    pub no_empty_line_before_block: bool,

    /// `[^note]` footnote references and definitions
    pub footnotes: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            tables: true,
            fenced_code: true,
            strikethrough: true,
            auto_heading_ids: true,
            no_empty_line_before_block: true,
            footnotes: true,
        }
    }
}

impl Extensions {
    /// Translate the extension set into pulldown-cmark parser options
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        options
    }
}

/// HTML output flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFlags {
    /// Open links to absolute URLs in a new tab
    pub href_target_blank: bool,

    /// Wrap the output in a standalone HTML document
    pub complete_page: bool,

    /// Append a back link to the reference at the end of each footnote
    pub footnote_return_links: bool,

    /// Typographic quotes, dashes and ellipses
    pub smart_punctuation: bool,

    /// Emit raw HTML from the source as escaped text
    pub escape_raw_html: bool,

    /// Page title for complete pages (defaults to the first heading)
    pub title: Option<String>,

    /// Inline stylesheet for complete pages
    pub stylesheet: Option<String>,
}

impl Default for HtmlFlags {
    fn default() -> Self {
        Self {
            href_target_blank: true,
            complete_page: true,
            footnote_return_links: true,
            smart_punctuation: true,
            escape_raw_html: false,
            title: None,
            stylesheet: None,
        }
    }
}

/// Complete configuration for [`super::render`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Grammar extensions
    pub extensions: Extensions,

    /// Output flags
    pub html: HtmlFlags,
}

impl MarkdownOptions {
    /// Options for an HTML fragment (no surrounding document)
    pub fn fragment() -> Self {
        Self {
            extensions: Extensions::default(),
            html: HtmlFlags {
                complete_page: false,
                ..HtmlFlags::default()
            },
        }
    }
}
