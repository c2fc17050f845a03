//! Content cleaning applied to every extracted section body.
//!
//! Catalyst exports carry backslash-escaped markdown punctuation and
//! inconsistent blank-line padding; cleaning normalizes both so downstream
//! display layers get uniform text regardless of the source era.

/// Backslash escapes commonly found in Catalyst proposal exports.
const MARKDOWN_ESCAPES: [(&str, &str); 8] = [
    ("\\[", "["),
    ("\\]", "]"),
    ("\\(", "("),
    ("\\)", ")"),
    ("\\.", "."),
    ("\\-", "-"),
    ("\\_", "_"),
    ("\\*", "*"),
];

/// Clean an extracted section body: normalize line endings, collapse runs of
/// 3+ newlines to exactly 2, strip trailing whitespace per line, and remove
/// markdown backslash escapes. Idempotent on already-cleaned text.
pub fn clean_content(content: &str) -> String {
    let content = content.trim().replace("\r\n", "\n");

    let mut content = content;
    while content.contains("\n\n\n") {
        content = content.replace("\n\n\n", "\n\n");
    }

    let content = content
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");

    let mut content = content;
    for (escaped, plain) in MARKDOWN_ESCAPES {
        content = content.replace(escaped, plain);
    }

    content.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_normalizes_line_endings() {
        assert_eq!(clean_content("  hello\r\nworld  "), "hello\nworld");
    }

    #[test]
    fn collapses_excessive_blank_lines() {
        let cleaned = clean_content("first\n\n\n\n\nsecond\n\n\nthird");
        assert_eq!(cleaned, "first\n\nsecond\n\nthird");
        assert!(!cleaned.contains("\n\n\n"));
    }

    #[test]
    fn strips_trailing_whitespace_per_line() {
        assert_eq!(clean_content("one   \ntwo\t\nthree"), "one\ntwo\nthree");
    }

    #[test]
    fn unescapes_markdown_punctuation() {
        let cleaned = clean_content(r"Visit \[our website\]\(https://example\.com\) for more\.");
        assert_eq!(cleaned, "Visit [our website](https://example.com) for more.");
        assert!(!cleaned.contains('\\'));
    }

    #[test]
    fn cleaning_is_idempotent() {
        let raw = "### heading   \n\n\n\nbody with \\[escapes\\]\n\n\n\nmore\r\n";
        let once = clean_content(raw);
        let twice = clean_content(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn whitespace_only_input_cleans_to_empty() {
        assert_eq!(clean_content("   \n\n \t "), "");
    }
}
