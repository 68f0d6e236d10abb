use crate::commands::{AppState, CommandError};
use crate::models::{BestMatchQuery, BestMatchResponse, CriteriaEcho};

/// Best-match search
///
/// Query parameters:
/// `cuisine`, `price_range`, `tags` (comma-separated or repeated), `city`,
/// `state`, `lat`, `lng`, `radius_km`
pub fn best_match(state: &AppState, raw_query: &str) -> Result<BestMatchResponse, CommandError> {
    let query = BestMatchQuery::parse(raw_query)?;
    let criteria = query.into_criteria(state.default_radius_km)?;

    tracing::info!(
        "Best match search: cuisine={:?}, price_range={:?}, tags={:?}, origin={:?}, radius_km={}",
        criteria.cuisine,
        criteria.price_range,
        criteria.tags,
        criteria.origin(),
        criteria.radius_km
    );

    let candidates = state
        .catalog
        .candidates_for(criteria.cuisine.as_deref(), query.city(), query.state());

    tracing::debug!("Fetched {} candidates", candidates.len());

    let mut results = state.matcher.rank(&candidates, &criteria);
    if let Some(limit) = state.max_results {
        results.truncate(limit);
    }

    tracing::info!(
        "Returning {} matches (from {} candidates)",
        results.len(),
        candidates.len()
    );

    let echo = CriteriaEcho::new(&criteria, query.city(), query.state());
    Ok(BestMatchResponse::new(echo, results))
}
