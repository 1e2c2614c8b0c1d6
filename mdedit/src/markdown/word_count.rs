//! Word counting for the status display

use regex::Regex;
use std::sync::OnceLock;

/// Patterns applied in order before splitting on whitespace
struct WordCountPatterns {
    code_block: Regex,
    inline_code: Regex,
    html_tag: Regex,
    link: Regex,
}

static PATTERNS: OnceLock<WordCountPatterns> = OnceLock::new();

fn patterns() -> &'static WordCountPatterns {
    PATTERNS.get_or_init(|| WordCountPatterns {
        code_block: Regex::new(r"```[\s\S]*?```").expect("code block pattern is valid"),
        inline_code: Regex::new(r"`[^`]*`").expect("inline code pattern is valid"),
        html_tag: Regex::new(r"<[^>]*>").expect("HTML tag pattern is valid"),
        link: Regex::new(r"\[([^\[]+)\]\([^\)]+\)").expect("link pattern is valid"),
    })
}

/// Count the words in a Markdown buffer
///
/// Fenced code blocks, inline code spans and HTML tags are removed first,
/// then `[label](target)` links are reduced to their label. Code is removed
/// before links so link syntax inside code is never rewritten. The rest is
/// split on whitespace; block markers such as `#` or `-` count as words.
pub fn count_words(buffer: &str) -> usize {
    let patterns = patterns();

    let text = patterns.code_block.replace_all(buffer, "");
    let text = patterns.inline_code.replace_all(&text, "");
    let text = patterns.html_tag.replace_all(&text, "");
    let text = patterns.link.replace_all(&text, "$1");

    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_buffers() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t  "), 0);
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(count_words("Hello world"), 2);
        assert_eq!(count_words("  spaced\tout\n\nwords  "), 3);
    }

    #[test]
    fn test_inline_code_is_removed() {
        assert_eq!(count_words("Hello `code span` world"), 2);
    }

    /// The cleanup steps are regular expressions, not literal strings.
    /// Replacing the pattern text literally would never match real Markdown
    /// and the code span below would add a word.
    #[test]
    fn test_cleanup_uses_pattern_matching() {
        assert_eq!(count_words("a `b` c"), 2);
        assert_eq!(count_words("a <br> c"), 2);
        assert_eq!(count_words(r"literal `[^`]*` text"), 3);
    }

    #[test]
    fn test_link_label_is_counted() {
        assert_eq!(count_words("See [this link](http://example.com) now"), 4);
    }

    #[test]
    fn test_fenced_code_block_is_removed() {
        let buffer = "Intro text\n```rust\nlet a = b;\nfn main() {}\n```\nOutro";
        assert_eq!(count_words(buffer), 3);
    }

    #[test]
    fn test_multiple_code_blocks() {
        let buffer = "one\n```\ncode\n```\ntwo\n```\nmore code\n```\nthree";
        assert_eq!(count_words(buffer), 3);
    }

    #[test]
    fn test_link_syntax_inside_code_is_not_counted() {
        assert_eq!(count_words("`[label](target)` word"), 1);
        assert_eq!(count_words("```\n[label](target)\n```\nword"), 1);
    }

    #[test]
    fn test_html_tags_are_removed() {
        assert_eq!(count_words("<div class=\"note\">Hello</div> there"), 2);
    }

    #[test]
    fn test_block_markers_count_as_words() {
        assert_eq!(count_words("# Title\n\n- item"), 4);
    }
}
