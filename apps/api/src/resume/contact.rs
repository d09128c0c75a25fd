//! Contact extraction: best-effort name, email, and phone heuristics.
//!
//! Each field is extracted independently; a miss on one never affects the others
//! and is reported as an empty string rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_NAME_CHARS: usize = 60;

static BOILERPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)resume|résumé|curriculum vitae").unwrap());

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap());

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?[0-9][0-9\s().-]{7,}[0-9]").unwrap());

/// Returns the first line that plausibly holds the candidate's name.
///
/// `lines` must be the trimmed, non-empty lines of the normalized text. A line
/// qualifies when it is at most 60 characters, has no digits, has no `@`, and is
/// not a "Resume"/"Curriculum Vitae" banner.
pub fn extract_name(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .find(|line| {
            line.chars().count() <= MAX_NAME_CHARS
                && !line.chars().any(|c| c.is_ascii_digit())
                && !line.contains('@')
                && !BOILERPLATE.is_match(line)
        })
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn extract_email(raw_text: &str) -> String {
    EMAIL
        .find(raw_text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First match of an optional `+`, a digit, at least seven digits or
/// separators (space, parentheses, hyphen, dot), then a closing digit.
pub fn extract_phone(raw_text: &str) -> String {
    PHONE
        .find(raw_text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
