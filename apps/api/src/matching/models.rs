use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resume::models::ParsedProfile;

/// The fields of a job record that matching reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub skill_tags: Vec<String>,
    pub requirements: Vec<String>,
    /// 0 means the posting does not state a requirement.
    pub experience_level_years: f64,
    pub location: String,
}

impl JobPosting {
    /// `skill_tags`, or `requirements` when no tags were set.
    pub fn skill_list(&self) -> &[String] {
        if self.skill_tags.is_empty() {
            &self.requirements
        } else {
            &self.skill_tags
        }
    }
}

/// Candidate attributes a job list is ranked against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchCriteria {
    pub candidate_skills: Vec<String>,
    pub experience_years: f64,
    pub preferred_locations: Vec<String>,
}

impl MatchCriteria {
    pub fn new(
        candidate_skills: Vec<String>,
        experience_years: f64,
        preferred_locations: Vec<String>,
    ) -> Self {
        Self {
            candidate_skills,
            experience_years: sanitize_years(experience_years),
            preferred_locations,
        }
    }

    /// Uses the profile's detected skills as the candidate skill set.
    pub fn from_profile(
        profile: &ParsedProfile,
        experience_years: f64,
        preferred_locations: Vec<String>,
    ) -> Self {
        Self::new(profile.skills.clone(), experience_years, preferred_locations)
    }
}

/// One job's score and the job skills that explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_id: Uuid,
    pub title: String,
    pub match_score: f64,
    pub matched_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            location: 0.2,
        }
    }
}

/// Negative, NaN, and infinite year counts all mean "nothing usable": 0.
pub fn sanitize_years(years: f64) -> f64 {
    if years.is_finite() && years > 0.0 {
        years
    } else {
        0.0
    }
}

/// Coerces a loosely-typed JSON value into a year count.
///
/// Numbers and numeric strings are accepted; anything else is 0.
pub fn coerce_years(value: &serde_json::Value) -> f64 {
    let years = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    sanitize_years(years)
}
