use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::models::domain::{ListFilters, RestaurantRecord, SearchCriteria, SortOrder};

/// Errors raised while turning raw parameters into criteria
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid query parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid request body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Decoded `application/x-www-form-urlencoded` key/value pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut pairs = Vec::new();

        for segment in raw.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            pairs.push((decode_component(key)?, decode_component(value)?));
        }

        Ok(Self { pairs })
    }

    /// First non-empty value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn decode_component(component: &str) -> Result<String, RequestError> {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| RequestError::InvalidParameter {
            name: component.to_string(),
            reason: e.to_string(),
        })
}

/// Numeric coercion: blank, unparsable or non-finite values are absent
pub fn to_number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Split comma-separated tag values, trim, drop empties and de-duplicate
/// keeping the first occurrence
pub fn normalize_tags<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tags: Vec<String> = Vec::new();
    for tag in values.into_iter().flat_map(|v| v.split(',')).map(str::trim) {
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Raw parameters of a best-match search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestMatchQuery {
    pub cuisine: Option<String>,
    pub price_range: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius_km: Option<String>,
}

impl BestMatchQuery {
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        Ok(Self::from_params(&QueryParams::parse(raw)?))
    }

    pub fn from_params(params: &QueryParams) -> Self {
        let owned = |key: &str| params.get(key).map(str::to_string);
        Self {
            cuisine: owned("cuisine"),
            price_range: owned("price_range"),
            tags: params.get_all("tags").map(str::to_string).collect(),
            city: owned("city"),
            state: owned("state"),
            lat: owned("lat"),
            lng: owned("lng"),
            radius_km: owned("radius_km"),
        }
    }

    /// Coerce the raw parameters into validated search criteria
    ///
    /// A missing or zero radius takes `default_radius_km`. Negative radii and
    /// out-of-range coordinates are rejected.
    pub fn into_criteria(&self, default_radius_km: f64) -> Result<SearchCriteria, RequestError> {
        let radius_km = to_number(self.radius_km.as_deref())
            .filter(|r| *r != 0.0)
            .unwrap_or(default_radius_km);

        let criteria = SearchCriteria {
            cuisine: non_empty(&self.cuisine),
            price_range: non_empty(&self.price_range),
            tags: normalize_tags(self.tags.iter().map(String::as_str)),
            latitude: to_number(self.lat.as_deref()),
            longitude: to_number(self.lng.as_deref()),
            radius_km,
        };

        criteria.validate()?;
        Ok(criteria)
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref().filter(|s| !s.is_empty())
    }
}

/// Parameters of a catalog listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery;

impl ListQuery {
    /// Parse `cuisine`, `city`, `state`, `min_rating` and `sort`
    ///
    /// A zero minimum rating means no minimum.
    pub fn parse(raw: &str) -> Result<ListFilters, RequestError> {
        let params = QueryParams::parse(raw)?;
        let owned = |key: &str| params.get(key).map(str::to_string);

        Ok(ListFilters {
            cuisine: owned("cuisine"),
            city: owned("city"),
            state: owned("state"),
            min_rating: to_number(params.get("min_rating")).filter(|r| *r != 0.0),
            sort: params.get("sort").map(SortOrder::from_param).unwrap_or_default(),
        })
    }
}

/// Body of a create or update request
///
/// Numeric fields accept numbers or numeric strings. Tags accept an array or
/// a comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RestaurantInput {
    /// Target of an update, ignored on create
    pub id: Option<i64>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<serde_json::Value>,
    pub longitude: Option<serde_json::Value>,
    pub cuisine: Option<String>,
    pub price_range: Option<String>,
    pub tags: Option<serde_json::Value>,
    pub rating: Option<serde_json::Value>,
    pub notes: Option<String>,
}

impl RestaurantInput {
    pub fn parse(body: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Required fields that are absent or empty, in declaration order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("city", &self.city),
            ("state", &self.state),
            ("cuisine", &self.cuisine),
            ("price_range", &self.price_range),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(field, _)| field)
        .collect()
    }

    /// Build the stored record under `id`
    ///
    /// Callers check [`missing_fields`](Self::missing_fields) first; absent
    /// required fields become empty strings here.
    pub fn into_record(self, id: i64) -> RestaurantRecord {
        let tags = match &self.tags {
            Some(serde_json::Value::Array(values)) => {
                normalize_tags(values.iter().filter_map(serde_json::Value::as_str))
            }
            Some(serde_json::Value::String(value)) => normalize_tags([value.as_str()]),
            _ => Vec::new(),
        };

        RestaurantRecord {
            id,
            name: self.name.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            latitude: json_number(self.latitude.as_ref()),
            longitude: json_number(self.longitude.as_ref()),
            cuisine: self.cuisine.unwrap_or_default(),
            price_range: self.price_range.unwrap_or_default(),
            rating: json_number(self.rating.as_ref()),
            tags,
            notes: self.notes.filter(|n| !n.is_empty()),
        }
    }
}

/// [`to_number`] for JSON values: numbers pass through, strings are parsed
fn json_number(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => to_number(Some(s.as_str())),
        _ => None,
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
