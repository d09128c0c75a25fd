pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes/parse", post(resume::handle_parse_resume))
        .route(
            "/api/v1/resumes/:id/download",
            get(resume::handle_download_resume),
        )
        .route("/api/v1/resumes/match", post(matching::handle_match_profile))
        // Matching API
        .route("/api/v1/jobs/match", post(matching::handle_match_jobs))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
