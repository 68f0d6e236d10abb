use serde::{Deserialize, Serialize};

use crate::models::domain::{MatchResult, SearchCriteria};

/// Criteria as interpreted, echoed back with the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaEcho {
    pub cuisine: Option<String>,
    pub price_range: Option<String>,
    pub tags: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: f64,
}

impl CriteriaEcho {
    pub fn new(criteria: &SearchCriteria, city: Option<&str>, state: Option<&str>) -> Self {
        Self {
            cuisine: criteria.cuisine.clone(),
            price_range: criteria.price_range.clone(),
            tags: criteria.tags.clone(),
            city: city.map(str::to_string),
            state: state.map(str::to_string),
            latitude: criteria.latitude,
            longitude: criteria.longitude,
            radius_km: criteria.radius_km,
        }
    }
}

/// Response for a best-match search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatchResponse {
    pub criteria: CriteriaEcho,
    pub count: usize,
    pub message: String,
    pub results: Vec<MatchResult>,
}

impl BestMatchResponse {
    pub fn new(criteria: CriteriaEcho, results: Vec<MatchResult>) -> Self {
        let message = if results.is_empty() {
            "No matches found for the provided criteria."
        } else {
            "Matches found."
        };

        Self {
            criteria,
            count: results.len(),
            message: message.to_string(),
            results,
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
