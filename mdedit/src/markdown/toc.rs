//! Table of contents formatting

use super::headings::{extract_headings, HeadingEntry};
use itertools::Itertools;

/// Format headings as an indented Markdown list of anchor links
///
/// Each heading becomes `- [text](#slug)` indented by two spaces per level
/// below 1. Skipped levels are not corrected.
pub fn format_toc(headings: &[HeadingEntry]) -> String {
    headings
        .iter()
        .map(|heading| {
            format!(
                "{}- [{}](#{})",
                "  ".repeat(usize::from(heading.level.saturating_sub(1))),
                heading.text,
                heading.slug
            )
        })
        .join("\n")
}

/// Extract headings from a buffer and format them as a table of contents
pub fn extract_toc(buffer: &str) -> String {
    format_toc(&extract_headings(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: u8, text: &str, slug: &str) -> HeadingEntry {
        HeadingEntry {
            level,
            text: text.to_string(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn test_format_toc() {
        let toc = format_toc(&[entry(1, "A", "a"), entry(2, "B", "b")]);
        assert_eq!(toc, "- [A](#a)\n  - [B](#b)");
    }

    #[test]
    fn test_format_toc_empty() {
        assert_eq!(format_toc(&[]), "");
    }

    #[test]
    fn test_format_toc_skipped_levels() {
        let toc = format_toc(&[entry(1, "Top", "top"), entry(4, "Deep", "deep")]);
        assert_eq!(toc, "- [Top](#top)\n      - [Deep](#deep)");
    }

    #[test]
    fn test_extract_toc() {
        let toc = extract_toc("# Guide\n\n## Install it\n\n## Use it\n");
        assert_eq!(
            toc,
            "- [Guide](#guide)\n  - [Install it](#install-it)\n  - [Use it](#use-it)"
        );
        assert_eq!(extract_toc("no headings here"), "");
    }
}
