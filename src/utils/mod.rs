//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// First non-empty line of a multi-line text node, trimmed
pub fn first_line(text: &str) -> String {
    text.trim()
        .split('\n')
        .next()
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}

/// Resolve a possibly relative href against the site base URL
///
/// Hrefs already starting with `http` are returned untouched.
pub fn absolutize(base: &Url, href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }

    match base.join(href) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}{href}", base.as_str().trim_end_matches('/')),
    }
}
