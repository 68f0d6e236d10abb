use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::models::{
    CatalogSummary, CityRating, CuisineCount, ListFilters, RestaurantInput, RestaurantRecord,
    SortOrder,
};

/// Errors that can occur when loading, saving or editing the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Restaurant not found: {0}")]
    NotFound(i64),
}

/// In-memory restaurant catalog
///
/// Supplies candidate snapshots to the matcher and serves the management
/// interface. Matching only ever sees a snapshot taken before the call.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    restaurants: Vec<RestaurantRecord>,
}

impl Catalog {
    pub fn new(restaurants: Vec<RestaurantRecord>) -> Self {
        Self { restaurants }
    }

    /// Load a catalog from a JSON array of restaurant records
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path_str.clone(),
            source,
        })?;
        let restaurants: Vec<RestaurantRecord> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Json {
                path: path_str.clone(),
                source,
            })?;

        tracing::info!("Loaded {} restaurants from {}", restaurants.len(), path_str);

        Ok(Self::new(restaurants))
    }

    /// Write the catalog back as a JSON array
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let contents =
            serde_json::to_string_pretty(&self.restaurants).map_err(|source| CatalogError::Json {
                path: path_str.clone(),
                source,
            })?;
        std::fs::write(path, contents).map_err(|source| CatalogError::Io {
            path: path_str.clone(),
            source,
        })?;

        tracing::debug!("Saved {} restaurants to {}", self.restaurants.len(), path_str);
        Ok(())
    }

    pub fn restaurants(&self) -> &[RestaurantRecord] {
        &self.restaurants
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// List restaurants matching the coarse filters
    ///
    /// Cuisine is matched exactly, city and state case-insensitively.
    /// Unrated restaurants never satisfy a minimum rating.
    pub fn list(&self, filters: &ListFilters) -> Vec<RestaurantRecord> {
        let mut rows: Vec<RestaurantRecord> = self
            .restaurants
            .iter()
            .filter(|r| filters.cuisine.as_deref().map_or(true, |c| r.cuisine == c))
            .filter(|r| filters.city.as_deref().map_or(true, |c| r.city.eq_ignore_ascii_case(c)))
            .filter(|r| filters.state.as_deref().map_or(true, |s| r.state.eq_ignore_ascii_case(s)))
            .filter(|r| {
                filters
                    .min_rating
                    .map_or(true, |min| r.rating.map_or(false, |rating| rating >= min))
            })
            .cloned()
            .collect();

        match filters.sort {
            SortOrder::NameAsc => rows.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::RatingDesc => rows.sort_by(|a, b| {
                compare_rating_desc(a.rating, b.rating).then_with(|| a.name.cmp(&b.name))
            }),
            SortOrder::CityAsc => {
                rows.sort_by(|a, b| a.city.cmp(&b.city).then_with(|| a.name.cmp(&b.name)))
            }
        }

        rows
    }

    /// Coarse candidate fetch performed before matching
    pub fn candidates_for(
        &self,
        cuisine: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
    ) -> Vec<RestaurantRecord> {
        self.list(&ListFilters {
            cuisine: cuisine.map(str::to_string),
            city: city.map(str::to_string),
            state: state.map(str::to_string),
            ..ListFilters::default()
        })
    }

    /// Add a restaurant under the next free id
    pub fn create(&mut self, input: RestaurantInput) -> Result<RestaurantRecord, CatalogError> {
        check_required(&input)?;

        let id = self.restaurants.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = input.into_record(id);
        self.restaurants.push(record.clone());

        tracing::info!("Created restaurant {} ({})", record.id, record.name);
        Ok(record)
    }

    /// Replace every field of restaurant `id`, tags included
    pub fn update(&mut self, id: i64, input: RestaurantInput) -> Result<RestaurantRecord, CatalogError> {
        check_required(&input)?;

        let slot = self
            .restaurants
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        *slot = input.into_record(id);

        tracing::info!("Updated restaurant {} ({})", slot.id, slot.name);
        Ok(slot.clone())
    }

    /// Restaurant counts per cuisine and average rating per city
    pub fn summary(&self) -> CatalogSummary {
        let mut by_cuisine: BTreeMap<&str, usize> = BTreeMap::new();
        let mut by_city: BTreeMap<(&str, &str), (f64, usize)> = BTreeMap::new();

        for restaurant in &self.restaurants {
            *by_cuisine.entry(restaurant.cuisine.as_str()).or_default() += 1;

            if let Some(rating) = restaurant.rating {
                let entry = by_city
                    .entry((restaurant.city.as_str(), restaurant.state.as_str()))
                    .or_insert((0.0, 0));
                entry.0 += rating;
                entry.1 += 1;
            }
        }

        let mut count_by_cuisine: Vec<CuisineCount> = by_cuisine
            .into_iter()
            .map(|(cuisine, count)| CuisineCount {
                cuisine: cuisine.to_string(),
                count,
            })
            .collect();
        // Stable sort keeps cuisine name order for equal counts
        count_by_cuisine.sort_by(|a, b| b.count.cmp(&a.count));

        let mut avg_rating_by_city: Vec<CityRating> = by_city
            .into_iter()
            .map(|((city, state), (total, count))| CityRating {
                city: city.to_string(),
                state: state.to_string(),
                avg_rating: round_to_hundredths(total / count as f64),
            })
            .collect();
        avg_rating_by_city.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));

        CatalogSummary {
            count_by_cuisine,
            avg_rating_by_city,
        }
    }
}

fn check_required(input: &RestaurantInput) -> Result<(), CatalogError> {
    let missing = input.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::MissingFields(
            missing.into_iter().map(str::to_string).collect(),
        ))
    }
}

/// Descending by rating with unrated restaurants last
fn compare_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[inline]
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
