//! Heading extraction for navigation

use super::options::Extensions;
use super::slug::slugify;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// A heading found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Heading level (1 = h1, 2 = h2, etc.)
    pub level: u8,

    /// Literal heading text without inline markup
    pub text: String,

    /// Anchor derived from `text`, not deduplicated
    pub slug: String,
}

/// Builder for the heading currently being read
struct HeadingBuilder {
    level: u8,
    text: String,
}

impl HeadingBuilder {
    fn finish(self) -> HeadingEntry {
        let slug = slugify(&self.text);
        HeadingEntry {
            level: self.level,
            text: self.text,
            slug,
        }
    }
}

/// Extract all headings using the default extension set
///
/// # Parameters
/// * `buffer` - Markdown source text
///
/// # Returns
/// * `Vec<HeadingEntry>` - One entry per heading, in document order
pub fn extract_headings(buffer: &str) -> Vec<HeadingEntry> {
    extract_headings_with(buffer, &Extensions::default())
}

/// Extract all headings using a specific extension set
///
/// Text inside emphasis, strong, strikethrough and link spans is kept, the
/// markup itself is not. Inline code contributes its literal content and
/// inline HTML contributes nothing.
pub fn extract_headings_with(buffer: &str, extensions: &Extensions) -> Vec<HeadingEntry> {
    let mut headings = Vec::new();
    let mut current: Option<HeadingBuilder> = None;

    for event in Parser::new_ext(buffer, extensions.parser_options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some(HeadingBuilder {
                    level: level as u8,
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(builder) = current.take() {
                    headings.push(builder.finish());
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(builder) = current.as_mut() {
                    builder.text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(builder) = current.as_mut() {
                    builder.text.push(' ');
                }
            }
            _ => {}
        }
    }

    headings
}
