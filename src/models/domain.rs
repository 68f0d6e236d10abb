use serde::{Deserialize, Serialize};
use validator::Validate;

/// Radius applied when a search does not specify one
pub const DEFAULT_RADIUS_KM: f64 = 25.0;

/// Restaurant record as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub cuisine: String,
    pub price_range: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RestaurantRecord {
    /// Coordinates as a pair, only when both are known
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Search criteria for one matching call
///
/// Every optional field keeps the distinction between "not requested" and
/// "requested". Coordinates must be valid degrees when present; the request
/// boundary enforces this through [`Validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SearchCriteria {
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[serde(default = "default_radius_km")]
    #[validate(range(exclusive_min = 0.0))]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            cuisine: None,
            price_range: None,
            tags: Vec::new(),
            latitude: None,
            longitude: None,
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

impl SearchCriteria {
    /// Search origin, only when both latitude and longitude are given
    pub fn origin(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Scoring weights
///
/// `attribute`, `distance` and `rating` combine at the outer level;
/// `cuisine`, `price` and `tag` combine inside the attribute sub-score.
/// Weights are used as given, no normalization is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfiguration {
    pub attribute: f64,
    pub distance: f64,
    pub rating: f64,
    pub cuisine: f64,
    pub price: f64,
    pub tag: f64,
}

impl Default for WeightConfiguration {
    fn default() -> Self {
        Self {
            attribute: 0.55,
            distance: 0.2,
            rating: 0.25,
            cuisine: 0.4,
            price: 0.2,
            tag: 0.2,
        }
    }
}

/// Ranked match: the original record plus distance, score and explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub restaurant: RestaurantRecord,
    pub distance_km: Option<f64>,
    pub score: f64,
    pub explanation: String,
}

/// Ordering applied by catalog listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NameAsc,
    RatingDesc,
    CityAsc,
}

impl SortOrder {
    /// Unknown values fall back to name ordering
    pub fn from_param(value: &str) -> Self {
        match value {
            "rating_desc" => SortOrder::RatingDesc,
            "city_asc" => SortOrder::CityAsc,
            _ => SortOrder::NameAsc,
        }
    }
}

/// Coarse catalog filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilters {
    pub cuisine: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub min_rating: Option<f64>,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineCount {
    pub cuisine: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRating {
    pub city: String,
    pub state: String,
    pub avg_rating: f64,
}

/// Aggregate view of the catalog for the management interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    #[serde(rename = "countByCuisine")]
    pub count_by_cuisine: Vec<CuisineCount>,
    #[serde(rename = "avgRatingByCity")]
    pub avg_rating_by_city: Vec<CityRating>,
}
