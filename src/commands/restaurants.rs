use std::sync::Arc;

use crate::commands::{AppState, CommandError};
use crate::models::{CatalogSummary, ListQuery, RequestError, RestaurantInput, RestaurantRecord};

/// Catalog listing
///
/// Query parameters: `cuisine`, `city`, `state`, `min_rating`,
/// `sort` (`name_asc` | `rating_desc` | `city_asc`)
pub fn list_restaurants(state: &AppState, raw_query: &str) -> Result<Vec<RestaurantRecord>, CommandError> {
    let filters = ListQuery::parse(raw_query)?;
    let rows = state.catalog.list(&filters);

    tracing::info!("Listing {} restaurants with {:?}", rows.len(), filters);

    Ok(rows)
}

/// Counts per cuisine and average rating per city
pub fn summarize(state: &AppState) -> CatalogSummary {
    tracing::info!("Summarizing {} restaurants", state.catalog.len());
    state.catalog.summary()
}

/// Add a restaurant from a JSON body
pub fn create_restaurant(state: &mut AppState, body: &str) -> Result<RestaurantRecord, CommandError> {
    let input = RestaurantInput::parse(body)?;
    tracing::info!("Creating restaurant {:?}", input.name);

    let created = Arc::make_mut(&mut state.catalog).create(input)?;
    persist(state)?;

    Ok(created)
}

/// Replace the restaurant named by the body's `id`
pub fn update_restaurant(state: &mut AppState, body: &str) -> Result<RestaurantRecord, CommandError> {
    let input = RestaurantInput::parse(body)?;
    let id = input.id.ok_or_else(|| RequestError::InvalidParameter {
        name: "id".to_string(),
        reason: "required for update".to_string(),
    })?;
    tracing::info!("Updating restaurant {}", id);

    let updated = Arc::make_mut(&mut state.catalog).update(id, input)?;
    persist(state)?;

    Ok(updated)
}

fn persist(state: &AppState) -> Result<(), CommandError> {
    if let Some(path) = &state.catalog_path {
        state.catalog.save(path)?;
    }
    Ok(())
}
