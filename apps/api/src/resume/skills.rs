//! Skill detection against a controlled keyword vocabulary.
//!
//! Matching is a plain substring search over the lower-cased document. It will
//! over-match keywords embedded in longer words ("java" inside "javascript");
//! that is accepted behavior.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

const DEFAULT_KEYWORDS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "redux",
    "node",
    "express",
    "mongodb",
    "mongoose",
    "sql",
    "postgresql",
    "mysql",
    "html",
    "css",
    "tailwind",
    "aws",
    "docker",
    "kubernetes",
    "python",
    "java",
    "c#",
    "c++",
    "git",
    "rest",
    "graphql",
];

/// Immutable, lower-cased keyword list. Built once at startup and shared.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillVocabulary {
    keywords: Vec<String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from arbitrary keywords: trimmed, lower-cased,
    /// blanks dropped, first occurrence kept.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !out.contains(&keyword) {
                out.push(keyword);
            }
        }
        Self { keywords: out }
    }

    /// Loads one keyword per line. Blank lines and `#` comments are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill vocabulary '{}'", path.display()))?;
        let vocabulary = Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );
        info!(
            "Loaded {} skill keywords from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    #[cfg(test)]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Returns every keyword found in `raw_text`, in vocabulary order, capitalized
    /// for display.
    pub fn detect(&self, raw_text: &str) -> Vec<String> {
        let lower = raw_text.to_lowercase();
        self.keywords
            .iter()
            .filter(|keyword| lower.contains(keyword.as_str()))
            .map(|keyword| capitalize(keyword))
            .collect()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
