//! Text sanitization for values scraped out of athletics pages
//!
//! Sidearm markup pads most fields with newlines and indentation and
//! occasionally carries zero-width characters from the CMS editor.

use crate::utils::{first_line, normalize_whitespace};

/// Clean a scraped text node into a single trimmed line
///
/// # Examples
///
/// ```
/// use athletics_mcp::parser::sanitize::sanitize_text;
///
/// assert_eq!(sanitize_text("\n   John\u{200B}   Smith \n"), "John Smith");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let cleaned = remove_control_chars(&remove_zero_width(text));
    normalize_whitespace(&cleaned)
}

/// Keep only the first line of a multi-line text node, then clean it
///
/// Position cells list the abbreviation on the first line and the long form
/// below it.
pub fn sanitize_first_line(text: &str) -> String {
    sanitize_text(&first_line(&remove_zero_width(text)))
}

/// Remove zero-width spaces and similar invisible characters
///
/// # Examples
///
/// ```
/// use athletics_mcp::parser::sanitize::remove_zero_width;
///
/// assert_eq!(remove_zero_width("W\u{200B}in\u{FEFF}"), "Win");
/// ```
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Remove control characters except newline and tab
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text_collapses_whitespace() {
        assert_eq!(sanitize_text("  Canyon,\n\t Texas  "), "Canyon, Texas");
        assert_eq!(sanitize_text(""), "");
    }

    #[test]
    fn test_sanitize_text_non_breaking_space() {
        assert_eq!(sanitize_text("6'2\"\u{a0}"), "6'2\"");
    }

    #[test]
    fn test_sanitize_first_line() {
        assert_eq!(sanitize_first_line("\n  WR\n  Wide Receiver\n"), "WR");
        assert_eq!(sanitize_first_line("   "), "");
    }

    #[test]
    fn test_remove_control_chars() {
        let clean = remove_control_chars("W\x00 3-1\x07");
        assert_eq!(clean, "W 3-1");
    }
}
