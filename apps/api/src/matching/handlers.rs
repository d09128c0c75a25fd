//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::broadcast::{broadcast_best_effort, MatchEvent};
use crate::matching::models::{coerce_years, MatchCriteria, MatchResult};
use crate::matching::ranker::{rank, validate_criteria};
use crate::resume::models::ParsedProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchJobsRequest {
    #[serde(default)]
    pub candidate_skills: Vec<String>,
    /// Any JSON value; non-numeric input counts as 0 years.
    #[serde(default)]
    pub experience_years: serde_json::Value,
    #[serde(default)]
    pub preferred_location: Option<String>,
    /// Takes precedence over `preferred_location` when present.
    #[serde(default)]
    pub preferred_locations: Option<Vec<String>>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl MatchJobsRequest {
    pub fn into_criteria(self) -> MatchCriteria {
        let preferred_locations = match (self.preferred_locations, self.preferred_location) {
            (Some(locations), _) => locations,
            (None, Some(location)) if !location.is_empty() => vec![location],
            _ => vec![],
        };
        MatchCriteria::new(
            self.candidate_skills,
            coerce_years(&self.experience_years),
            preferred_locations,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchProfileRequest {
    pub profile: ParsedProfile,
    #[serde(default)]
    pub experience_years: serde_json::Value,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchJobsResponse {
    pub success: bool,
    pub matches: Vec<MatchResult>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/match
///
/// Ranks the job catalog against caller-supplied skills, experience, and locations.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<MatchJobsRequest>,
) -> Result<Json<MatchJobsResponse>, AppError> {
    let limit = request.limit;
    let criteria = request.into_criteria();
    let matches = match_catalog(&state, &criteria, limit).await?;
    Ok(Json(MatchJobsResponse {
        success: true,
        matches,
    }))
}

/// POST /api/v1/resumes/match
///
/// Same ranking, with the candidate skills taken from a parsed resume profile.
pub async fn handle_match_profile(
    State(state): State<AppState>,
    Json(request): Json<MatchProfileRequest>,
) -> Result<Json<MatchJobsResponse>, AppError> {
    let criteria = MatchCriteria::from_profile(
        &request.profile,
        coerce_years(&request.experience_years),
        request.preferred_locations,
    );
    let matches = match_catalog(&state, &criteria, request.limit).await?;
    Ok(Json(MatchJobsResponse {
        success: true,
        matches,
    }))
}

/// Validates, loads the catalog, ranks, then broadcasts without letting the
/// broadcast affect the result.
async fn match_catalog(
    state: &AppState,
    criteria: &MatchCriteria,
    requested_limit: Option<usize>,
) -> Result<Vec<MatchResult>, AppError> {
    validate_criteria(criteria)?;

    let limit = effective_limit(requested_limit, state.config.match_limit);
    let jobs = state.catalog.list_jobs().await?;
    let matches = rank(state.scorer.as_ref(), criteria, &jobs, limit)?;

    info!(
        "Matched {} skills against {} jobs, returning {}",
        criteria.candidate_skills.len(),
        jobs.len(),
        matches.len()
    );

    broadcast_best_effort(
        state.match_sink.as_ref(),
        &MatchEvent {
            matches: &matches,
            criteria,
        },
        state.config.broadcast_timeout,
    )
    .await;

    Ok(matches)
}

/// Callers may ask for fewer results than the configured cap, never more.
fn effective_limit(requested: Option<usize>, cap: usize) -> usize {
    requested.map_or(cap, |limit| limit.min(cap))
}
