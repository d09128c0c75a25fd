// Job matching: weighted scoring, ranking, and best-effort result broadcast.
// Scorers are pure and synchronous; only catalog loading and broadcast touch I/O.

pub mod broadcast;
pub mod handlers;
pub mod models;
pub mod ranker;
pub mod scorer;

pub use scorer::WeightedJobScorer;
