// Resume intelligence: document decoding plus heuristic profile extraction.
// Decoding is CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod contact;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod sections;
pub mod skills;

pub use extract::ExtractorRegistry;
pub use parser::ResumeParser;
pub use skills::SkillVocabulary;
