//! Markdown to HTML rendering
//!
//! Parses the buffer with pulldown-cmark and rewrites the event stream before
//! handing it to the HTML writer. The rewrites implement the output flags that
//! pulldown-cmark does not provide itself: heading anchors, `target="_blank"`
//! links, footnote back links and escaped raw HTML.

use super::headings::{extract_headings_with, HeadingEntry};
use super::options::{Extensions, HtmlFlags, MarkdownOptions};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::{HashMap, HashSet};

/// Render a Markdown buffer to HTML
///
/// # Parameters
/// * `buffer` - Markdown source text
/// * `options` - Grammar extensions and HTML output flags
///
/// # Returns
/// * `String` - HTML fragment, or a complete page when `complete_page` is set.
///   An empty buffer always renders to an empty string.
pub fn render(buffer: &str, options: &MarkdownOptions) -> String {
    if buffer.is_empty() {
        return String::new();
    }

    let mut parser_options = options.extensions.parser_options();
    if options.html.smart_punctuation {
        parser_options.insert(Options::ENABLE_SMART_PUNCTUATION);
    }

    // Anchors come from the heading extractor so that the preview and the
    // table of contents agree even when smart punctuation rewrites the text.
    let headings = extract_headings_with(buffer, &options.extensions);

    let mut rewriter = EventRewriter::new(&options.extensions, &options.html, &headings);
    let events = Parser::new_ext(buffer, parser_options).map(|event| rewriter.rewrite(event));

    let mut body = String::with_capacity(buffer.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut body, events);

    log::debug!(
        "Rendered {} bytes of Markdown to {} bytes of HTML ({} headings)",
        buffer.len(),
        body.len(),
        headings.len()
    );

    if !options.html.complete_page {
        return body;
    }

    let title = options
        .html
        .title
        .clone()
        .or_else(|| headings.first().map(|h| h.text.clone()))
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    complete_page(&body, &title, options.html.stylesheet.as_deref())
}

/// Stateful one-to-one rewrite of parser events
struct EventRewriter<'o> {
    extensions: &'o Extensions,
    flags: &'o HtmlFlags,

    /// Headings in document order, consumed as heading tags are seen
    headings: std::slice::Iter<'o, HeadingEntry>,

    /// Footnote label to display number, by first appearance
    footnote_numbers: HashMap<String, usize>,

    /// Labels whose first reference already carries the back-link target
    referenced_footnotes: HashSet<String>,

    /// Label of the footnote definition currently open
    open_footnote: Option<String>,

    /// Inside a fenced block rendered as literal text
    in_literal_fence: bool,

    /// Nesting of image descriptions, which the writer flattens to alt text
    image_depth: usize,
}

impl<'o> EventRewriter<'o> {
    fn new(extensions: &'o Extensions, flags: &'o HtmlFlags, headings: &'o [HeadingEntry]) -> Self {
        Self {
            extensions,
            flags,
            headings: headings.iter(),
            footnote_numbers: HashMap::new(),
            referenced_footnotes: HashSet::new(),
            open_footnote: None,
            in_literal_fence: false,
            image_depth: 0,
        }
    }

    fn rewrite<'a>(&mut self, event: Event<'a>) -> Event<'a> {
        match event {
            Event::Html(html) | Event::InlineHtml(html) if self.flags.escape_raw_html => {
                Event::Text(html)
            }

            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                // Always advance so later headings stay aligned
                let entry = self.headings.next();
                let id = id.or_else(|| {
                    entry
                        .filter(|_| self.extensions.auto_heading_ids)
                        .filter(|h| !h.slug.is_empty())
                        .map(|h| CowStr::from(h.slug.clone()))
                });
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                })
            }

            Event::Start(Tag::Image { .. }) => {
                self.image_depth += 1;
                event
            }
            Event::End(TagEnd::Image) => {
                self.image_depth = self.image_depth.saturating_sub(1);
                event
            }

            // Links inside alt text must stay paired Start/End events
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) if self.flags.href_target_blank
                && self.image_depth == 0
                && is_external_url(&dest_url) =>
            {
                let mut anchor = format!("<a href=\"{}\"", escape_html(&dest_url));
                if !title.is_empty() {
                    anchor.push_str(&format!(" title=\"{}\"", escape_html(&title)));
                }
                anchor.push_str(" target=\"_blank\" rel=\"noopener noreferrer\">");
                Event::InlineHtml(anchor.into())
            }

            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if !self.extensions.fenced_code =>
            {
                self.in_literal_fence = true;
                Event::Html(format!("<p>```{}\n", escape_html(&info)).into())
            }
            Event::End(TagEnd::CodeBlock) if self.in_literal_fence => {
                self.in_literal_fence = false;
                Event::Html("```</p>\n".into())
            }

            Event::FootnoteReference(label) if self.flags.footnote_return_links => {
                let number = self.footnote_number(&label);
                let anchor = escape_html(&label);
                let id_attr = if self.referenced_footnotes.insert(label.to_string()) {
                    format!(" id=\"fnref-{}\"", anchor)
                } else {
                    String::new()
                };
                Event::InlineHtml(
                    format!(
                        "<sup class=\"footnote-reference\"{}><a href=\"#fn-{}\">{}</a></sup>",
                        id_attr, anchor, number
                    )
                    .into(),
                )
            }
            Event::Start(Tag::FootnoteDefinition(label)) if self.flags.footnote_return_links => {
                let number = self.footnote_number(&label);
                let html = format!(
                    "<div class=\"footnote-definition\" id=\"fn-{}\"><sup class=\"footnote-definition-label\">{}</sup>\n",
                    escape_html(&label),
                    number
                );
                self.open_footnote = Some(label.to_string());
                Event::Html(html.into())
            }
            Event::End(TagEnd::FootnoteDefinition) if self.open_footnote.is_some() => {
                let label = self.open_footnote.take().unwrap_or_default();
                Event::Html(
                    format!(
                        "<a href=\"#fnref-{}\" class=\"footnote-return\">↩</a></div>\n",
                        escape_html(&label)
                    )
                    .into(),
                )
            }

            other => other,
        }
    }

    /// Display number for a footnote label, assigned on first appearance
    fn footnote_number(&mut self, label: &str) -> usize {
        let next = self.footnote_numbers.len() + 1;
        *self
            .footnote_numbers
            .entry(label.to_string())
            .or_insert(next)
    }
}

/// Whether a link destination points outside the document
fn is_external_url(url: &str) -> bool {
    if url.starts_with("mailto:") {
        return true;
    }
    match url.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Wrap an HTML fragment in a standalone document
fn complete_page(body: &str, title: &str, stylesheet: Option<&str>) -> String {
    let mut page = String::with_capacity(body.len() + 512);
    page.push_str("<!DOCTYPE html>\n");
    page.push_str("<html lang=\"en\">\n");
    page.push_str("<head>\n");
    page.push_str("<meta charset=\"UTF-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    page.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    if let Some(css) = stylesheet {
        page.push_str("<style>\n");
        page.push_str(css);
        page.push_str("</style>\n");
    }
    page.push_str("</head>\n");
    page.push_str("<body>\n");
    page.push_str(body);
    page.push_str("</body>\n");
    page.push_str("</html>\n");
    page
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
