//! Restaurant Matcher - matching and ranking engine for restaurant search
//!
//! This library provides the best-match pipeline used by the restaurant
//! directory: hard-gate filtering, weighted multi-factor scoring, explanation
//! and deterministic ranking, plus the in-memory catalog that feeds it.

pub mod commands;
pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::haversine_distance, match_and_rank_restaurants, Matcher};
pub use models::{MatchResult, RestaurantRecord, SearchCriteria, WeightConfiguration};
pub use services::Catalog;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let results = match_and_rank_restaurants(&[], &SearchCriteria::default(), &WeightConfiguration::default());
        assert!(results.is_empty());
        assert!(haversine_distance(40.7128, -74.0060, 40.7228, -74.0060) > 1.0);
    }
}
