use crate::core::filters::CandidateEvaluation;
use crate::models::{RestaurantRecord, SearchCriteria, WeightConfiguration};

/// Sub-score used when a dimension cannot be evaluated
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Highest rating on the rating scale
const MAX_RATING: f64 = 5.0;

/// Sub-scores behind a total score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub rating_score: f64,
    pub tag_score: f64,
    pub distance_score: f64,
    pub attribute_score: f64,
    /// Weighted total, rounded to 3 decimals
    pub total: f64,
}

/// Calculate the score of a candidate that passed every gate
///
/// Scoring formula:
/// attribute_score = cuisine_match * cuisine + price_match * price + tag_score * tag
/// total = (
///     attribute_score * attribute +
///     distance_score * distance +   # linear decay to 0 at the radius
///     rating_score * rating         # rating / 5, unrated = 0
/// )
pub fn calculate_match_score(
    restaurant: &RestaurantRecord,
    evaluation: &CandidateEvaluation<'_>,
    criteria: &SearchCriteria,
    weights: &WeightConfiguration,
) -> ScoreBreakdown {
    let rating_score = rating_score(restaurant.rating);
    let tag_score = tag_score(evaluation.tag_matches.len(), criteria.tags.len());
    let distance_score = distance_score(evaluation.distance_km, criteria.radius_km);

    let attribute_score = indicator(evaluation.cuisine_match) * weights.cuisine
        + indicator(evaluation.price_match) * weights.price
        + tag_score * weights.tag;

    let total = attribute_score * weights.attribute
        + distance_score * weights.distance
        + rating_score * weights.rating;

    ScoreBreakdown {
        rating_score,
        tag_score,
        distance_score,
        attribute_score,
        total: round_score(total),
    }
}

/// Missing ratings score as the worst case
#[inline]
pub fn rating_score(rating: Option<f64>) -> f64 {
    rating.map_or(0.0, |r| r / MAX_RATING)
}

/// Share of requested tags matched, neutral when no tags were requested
#[inline]
pub fn tag_score(matched: usize, requested: usize) -> f64 {
    if requested == 0 {
        return NEUTRAL_SCORE;
    }
    matched as f64 / requested as f64
}

/// Linear decay from 1 at the origin to 0 at the radius, neutral when unknown
#[inline]
pub fn distance_score(distance_km: Option<f64>, radius_km: f64) -> f64 {
    match distance_km {
        // f64::max drops NaN, so degenerate radii score 0
        Some(d) => (1.0 - d / radius_km).max(0.0),
        None => NEUTRAL_SCORE,
    }
}

/// Round to 3 decimals, half away from zero
///
/// Rounds `score * 1000` in binary, so a value stored just below a midpoint
/// can still round up: `round_score(1.0005)` is `1.001` where a decimal
/// `toFixed(3)` gives `1.000`. Adding `0.0` folds a negative zero into
/// positive zero.
#[inline]
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0 + 0.0
}

#[inline]
fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}
