use tracing::debug;

use crate::errors::EngineError;
use crate::matching::models::{JobPosting, MatchCriteria, MatchResult};
use crate::matching::scorer::JobScorer;

pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// A candidate with no skills cannot be ranked.
pub fn validate_criteria(criteria: &MatchCriteria) -> Result<(), EngineError> {
    if criteria.candidate_skills.is_empty() {
        return Err(EngineError::InvalidCriteria(
            "candidate_skills must be a non-empty array".to_string(),
        ));
    }
    Ok(())
}

/// Scores every job independently, sorts best-first, and keeps the top `limit`.
///
/// Jobs with equal scores keep the order they were supplied in. Fails with
/// `InvalidCriteria` before scoring anything when the candidate has no skills.
pub fn rank(
    scorer: &dyn JobScorer,
    criteria: &MatchCriteria,
    jobs: &[JobPosting],
    limit: usize,
) -> Result<Vec<MatchResult>, EngineError> {
    validate_criteria(criteria)?;

    let mut results: Vec<MatchResult> = jobs
        .iter()
        .map(|job| {
            let score = scorer.score(job, criteria);
            MatchResult {
                job_id: job.id,
                title: job.title.clone(),
                match_score: score.match_score,
                matched_skills: score.matched_skills,
            }
        })
        .collect();

    // stable: ties stay in catalog order
    results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    results.truncate(limit);

    debug!(
        "Ranked {} jobs with {} scorer, returning {}",
        jobs.len(),
        scorer.name(),
        results.len()
    );
    Ok(results)
}
