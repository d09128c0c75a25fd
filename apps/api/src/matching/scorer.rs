//! Job scoring: pluggable, trait-based scorer that measures one candidate's
//! criteria against one job posting.
//!
//! Default: `WeightedJobScorer` (skills, experience, location; pure and deterministic).
//! `AppState` holds an `Arc<dyn JobScorer>`, chosen at startup.

use std::collections::HashSet;

use crate::matching::models::{sanitize_years, JobPosting, MatchCriteria, MatchWeights};

/// Score of one job against one criteria set.
#[derive(Debug, Clone, PartialEq)]
pub struct JobScore {
    /// 0 – 100, rounded to two decimals.
    pub match_score: f64,
    /// Job skill strings, original casing, first occurrence order.
    pub matched_skills: Vec<String>,
}

/// Implement this to swap scoring backends without touching the ranker or handlers.
///
/// Scoring never fails: degenerate input scores 0 on the affected component.
pub trait JobScorer: Send + Sync {
    fn score(&self, job: &JobPosting, criteria: &MatchCriteria) -> JobScore;

    fn name(&self) -> &str;
}

/// Weighted blend of skill overlap, experience coverage, and location preference.
///
/// Algorithm:
/// 1. skill = matched job skills / job skills (0 when the job lists none)
/// 2. experience = min(candidate / required, 1), or 1 when nothing is required
/// 3. location = 1 when any preferred location is a substring of the job location
/// 4. total = skill·w_s + experience·w_e + location·w_l, scaled to 0–100
#[derive(Debug, Clone, Default)]
pub struct WeightedJobScorer {
    weights: MatchWeights,
}

impl WeightedJobScorer {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }
}

impl JobScorer for WeightedJobScorer {
    fn score(&self, job: &JobPosting, criteria: &MatchCriteria) -> JobScore {
        let job_skills = job.skill_list();
        let matched_skills = matched_skills(job_skills, &criteria.candidate_skills);

        let skill_score = if job_skills.is_empty() {
            0.0
        } else {
            matched_skills.len() as f64 / job_skills.len() as f64
        };
        let experience_score = experience_score(
            sanitize_years(criteria.experience_years),
            sanitize_years(job.experience_level_years),
        );
        let location_score = location_score(&job.location, &criteria.preferred_locations);

        let total = skill_score * self.weights.skills
            + experience_score * self.weights.experience
            + location_score * self.weights.location;

        JobScore {
            match_score: to_percentage(total),
            matched_skills,
        }
    }

    fn name(&self) -> &str {
        "weighted"
    }
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Job skills whose normalized form is one of the candidate's skills.
/// Exact duplicates in the job list are reported once.
fn matched_skills(job_skills: &[String], candidate_skills: &[String]) -> Vec<String> {
    let candidate: HashSet<String> = candidate_skills.iter().map(|s| normalize_term(s)).collect();

    let mut matched: Vec<String> = Vec::new();
    for skill in job_skills {
        let normalized = normalize_term(skill);
        if !normalized.is_empty() && candidate.contains(&normalized) && !matched.contains(skill) {
            matched.push(skill.clone());
        }
    }
    matched
}

fn experience_score(candidate_years: f64, required_years: f64) -> f64 {
    if required_years > 0.0 {
        (candidate_years / required_years).min(1.0)
    } else {
        1.0
    }
}

/// No stated preference earns no credit.
fn location_score(job_location: &str, preferred: &[String]) -> f64 {
    let job_location = normalize_term(job_location);
    let hit = preferred
        .iter()
        .map(|loc| normalize_term(loc))
        .filter(|loc| !loc.is_empty())
        .any(|loc| job_location.contains(&loc));
    if hit {
        1.0
    } else {
        0.0
    }
}

/// Scales a 0–1 total to 0–100 with two decimals, half rounding up.
fn to_percentage(total: f64) -> f64 {
    ((total * 10_000.0).round() / 100.0).clamp(0.0, 100.0)
}
