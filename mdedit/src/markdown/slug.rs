//! Heading anchor slugs

/// Generate an anchor slug from heading text
///
/// Lower-cases the text, turns each space into a hyphen and drops every
/// character other than `a-z`, `0-9` and `-`. Non-ASCII text is removed
/// entirely, so a heading written in another script can produce an empty
/// slug. Runs of hyphens are not collapsed and duplicates are not numbered.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|&c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        .collect()
}
