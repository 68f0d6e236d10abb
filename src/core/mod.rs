// Core algorithm exports
pub mod distance;
pub mod explanation;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::{distance_from_origin, haversine_distance};
pub use explanation::{build_explanation, ExplanationFacts};
pub use filters::{evaluate_candidate, CandidateEvaluation};
pub use matcher::{match_and_rank_restaurants, Matcher};
pub use scoring::{calculate_match_score, round_score, ScoreBreakdown};
