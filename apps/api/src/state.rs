use std::sync::Arc;

use crate::config::Config;
use crate::matching::broadcast::MatchSink;
use crate::matching::scorer::JobScorer;
use crate::resume::parser::ResumeParser;
use crate::storage::{DocumentStore, JobCatalog};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extractors plus the skill vocabulary; immutable after startup.
    pub parser: Arc<ResumeParser>,
    /// Pluggable job scorer. Default: WeightedJobScorer.
    pub scorer: Arc<dyn JobScorer>,
    pub documents: Arc<dyn DocumentStore>,
    pub catalog: Arc<dyn JobCatalog>,
    /// Best-effort broadcast of match results. Failures never reach the caller.
    pub match_sink: Arc<dyn MatchSink>,
}
