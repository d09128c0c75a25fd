use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured candidate data recovered from a resume.
///
/// Every field defaults to empty; a missing field is a heuristic miss, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Display casing, vocabulary order, no duplicates.
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
}

/// Metadata for an uploaded document held by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: usize,
    pub uploaded_at: DateTime<Utc>,
}
