//! Markdown text processing
//!
//! Pure functions over a document buffer:
//! - [`render`]: Markdown to HTML with the configured extensions
//! - [`extract_headings`]: ordered heading list with anchor slugs
//! - [`format_toc`]: nested-list table of contents
//! - [`count_words`]: word count ignoring code, HTML and link targets
//!
//! None of these functions hold state between calls, so they can be invoked
//! from any number of threads at once.

mod headings;
mod options;
mod render;
mod slug;
mod toc;
mod word_count;

pub use headings::{extract_headings, extract_headings_with, HeadingEntry};
pub use options::{Extensions, HtmlFlags, MarkdownOptions};
pub use render::render;
pub use slug::slugify;
pub use toc::{extract_toc, format_toc};
pub use word_count::count_words;
