use crate::core::distance::distance_from_origin;
use crate::models::{RestaurantRecord, SearchCriteria};

/// Outcome of the hard gates for a single candidate
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEvaluation<'a> {
    pub distance_km: Option<f64>,
    pub within_radius: bool,
    pub cuisine_match: bool,
    pub price_match: bool,
    /// Requested tags present on the candidate, in request order
    pub tag_matches: Vec<&'a str>,
    pub tags_match: bool,
}

impl CandidateEvaluation<'_> {
    /// A candidate is retained only when every gate passes
    #[inline]
    pub fn passes(&self) -> bool {
        self.within_radius && self.cuisine_match && self.price_match && self.tags_match
    }
}

/// Evaluate every hard gate for a candidate
pub fn evaluate_candidate<'a>(
    restaurant: &RestaurantRecord,
    criteria: &'a SearchCriteria,
) -> CandidateEvaluation<'a> {
    let distance_km = distance_from_origin(restaurant, criteria);
    let tag_matches = matching_tags(restaurant, &criteria.tags);
    let tags_match = criteria.tags.is_empty() || !tag_matches.is_empty();

    CandidateEvaluation {
        distance_km,
        within_radius: within_radius(distance_km, criteria.radius_km),
        cuisine_match: matches_optional(&criteria.cuisine, &restaurant.cuisine),
        price_match: matches_optional(&criteria.price_range, &restaurant.price_range),
        tag_matches,
        tags_match,
    }
}

/// Unknown distance never fails the radius gate; the boundary is inclusive
#[inline]
pub fn within_radius(distance_km: Option<f64>, radius_km: f64) -> bool {
    distance_km.map_or(true, |d| d <= radius_km)
}

/// Exact, case-sensitive equality when a filter is requested
#[inline]
pub fn matches_optional(requested: &Option<String>, actual: &str) -> bool {
    requested.as_deref().map_or(true, |wanted| wanted == actual)
}

pub fn matching_tags<'a>(restaurant: &RestaurantRecord, requested: &'a [String]) -> Vec<&'a str> {
    requested
        .iter()
        .filter(|tag| restaurant.has_tag(tag))
        .map(String::as_str)
        .collect()
}
