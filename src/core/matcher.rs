use crate::core::{
    explanation::{build_explanation, ExplanationFacts},
    filters::evaluate_candidate,
    scoring::calculate_match_score,
};
use crate::models::{MatchResult, RestaurantRecord, SearchCriteria, WeightConfiguration};

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Hard gates (radius, cuisine, price, tags)
/// 2. Scoring of the retained candidates
/// 3. Explanation
/// 4. Ranking by descending score
///
/// The matcher holds only its weights and is safe to share across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: WeightConfiguration,
}

impl Matcher {
    pub fn new(weights: WeightConfiguration) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: WeightConfiguration::default(),
        }
    }

    pub fn weights(&self) -> &WeightConfiguration {
        &self.weights
    }

    /// Filter, score and rank candidates for a search
    ///
    /// Ordering is by descending score. The sort is stable, so equal scores
    /// keep the order in which candidates were supplied. An empty result is
    /// a normal outcome.
    pub fn rank(&self, restaurants: &[RestaurantRecord], criteria: &SearchCriteria) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = restaurants
            .iter()
            .filter_map(|restaurant| {
                let evaluation = evaluate_candidate(restaurant, criteria);
                if !evaluation.passes() {
                    tracing::trace!("Rejected restaurant {}: {:?}", restaurant.id, evaluation);
                    return None;
                }

                let breakdown = calculate_match_score(restaurant, &evaluation, criteria, &self.weights);
                let explanation = build_explanation(&ExplanationFacts {
                    cuisine_match: evaluation.cuisine_match,
                    price_match: evaluation.price_match,
                    tag_matches: &evaluation.tag_matches,
                    distance_km: evaluation.distance_km,
                    rating: restaurant.rating,
                });

                Some(MatchResult {
                    restaurant: restaurant.clone(),
                    distance_km: evaluation.distance_km,
                    score: breakdown.total,
                    explanation,
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            "Ranked {} of {} candidates",
            results.len(),
            restaurants.len()
        );

        results
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Single-call form: rank `restaurants` for `criteria` under `weights`
pub fn match_and_rank_restaurants(
    restaurants: &[RestaurantRecord],
    criteria: &SearchCriteria,
    weights: &WeightConfiguration,
) -> Vec<MatchResult> {
    Matcher::new(*weights).rank(restaurants, criteria)
}
