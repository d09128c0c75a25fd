//! Section extraction: isolates free-text resume sections by heading detection.
//!
//! Works as a two-pass line scan. The first pass locates the section's heading
//! line; the second finds the next line shaped like an ALL-CAPS heading. The body
//! is everything between the two.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::normalize::normalize;

pub const EXPERIENCE_HEADINGS: &[&str] =
    &["experience", "work experience", "employment", "work history"];

pub const EDUCATION_HEADINGS: &[&str] =
    &["education", "academics", "qualification", "qualifications"];

static CAPS_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z\s]{2,}:?$").unwrap());

/// Returns the normalized body of the section introduced by one of `headings`,
/// or an empty string when no heading line is present.
pub fn extract_section(raw_text: &str, headings: &[&str]) -> String {
    let lines: Vec<&str> = raw_text.split('\n').collect();

    let Some(start) = lines.iter().position(|line| is_heading_line(line, headings)) else {
        return String::new();
    };

    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| is_caps_heading(line))
        .map(|(idx, _)| idx)
        .unwrap_or(lines.len());

    normalize(&lines[start + 1..end].join("\n"))
}

/// A heading line holds nothing but one of the synonyms, optionally followed by a colon.
fn is_heading_line(line: &str, headings: &[&str]) -> bool {
    let trimmed = line.trim();
    let label = trimmed.strip_suffix(':').unwrap_or(trimmed).trim_end();
    if label.is_empty() {
        return false;
    }
    let label = label.to_lowercase();
    headings.iter().any(|h| h.to_lowercase() == label)
}

fn is_caps_heading(line: &str) -> bool {
    CAPS_HEADING.is_match(line.trim())
}
