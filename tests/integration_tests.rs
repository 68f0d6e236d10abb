// Integration tests for Restaurant Matcher

use restaurant_matcher::commands::{self, best_match::best_match, AppState, Command, CommandError};
use restaurant_matcher::core::{distance::haversine_distance, Matcher};
use restaurant_matcher::models::{RestaurantRecord, SearchCriteria, WeightConfiguration};
use restaurant_matcher::services::{Catalog, CatalogError};
use std::sync::Arc;

const CATALOG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/restaurants.json");

fn create_restaurant(
    id: i64,
    cuisine: &str,
    lat: Option<f64>,
    lon: Option<f64>,
    rating: Option<f64>,
    tags: &[&str],
) -> RestaurantRecord {
    RestaurantRecord {
        id,
        name: format!("Restaurant {}", id),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        latitude: lat,
        longitude: lon,
        cuisine: cuisine.to_string(),
        price_range: "$$".to_string(),
        rating,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        notes: None,
    }
}

fn create_state(max_results: Option<usize>) -> AppState {
    AppState {
        catalog: Arc::new(Catalog::load(CATALOG_PATH).expect("sample catalog loads")),
        matcher: Matcher::with_default_weights(),
        default_radius_km: 25.0,
        max_results,
        catalog_path: None,
    }
}

#[test]
fn test_scenario_a_closer_restaurant_ranks_first() {
    let matcher = Matcher::with_default_weights();
    let criteria = SearchCriteria {
        latitude: Some(37.78),
        longitude: Some(-122.42),
        radius_km: 10.0,
        ..SearchCriteria::default()
    };

    let candidates = vec![
        create_restaurant(1, "Thai", Some(37.852), Some(-122.42), Some(4.9), &[]), // ~8km
        create_restaurant(2, "Thai", Some(37.798), Some(-122.42), Some(4.5), &[]), // ~2km
    ];

    let results = matcher.rank(&candidates, &criteria);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].restaurant.id, 2);
    assert_eq!(results[0].score, 0.77);
    assert_eq!(results[1].restaurant.id, 1);
    assert_eq!(results[1].score, 0.67);
    assert_eq!(
        results[0].explanation,
        "Cuisine matches • Price range matches • Within 2.0 km • Rating 4.5"
    );
}

#[test]
fn test_scenario_b_cuisine_filter_excludes_others() {
    let matcher = Matcher::with_default_weights();
    let criteria = SearchCriteria {
        cuisine: Some("Thai".to_string()),
        ..SearchCriteria::default()
    };

    let candidates = vec![
        create_restaurant(1, "Italian", None, None, Some(5.0), &[]),
        create_restaurant(2, "Thai", None, None, Some(1.0), &[]),
        create_restaurant(3, "French", None, None, Some(4.9), &[]),
        create_restaurant(4, "Thai", None, None, None, &[]),
    ];

    let results = matcher.rank(&candidates, &criteria);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.restaurant.cuisine == "Thai"));
}

#[test]
fn test_scenario_c_partial_tag_match() {
    let matcher = Matcher::new(WeightConfiguration {
        attribute: 1.0,
        distance: 0.0,
        rating: 0.0,
        cuisine: 0.0,
        price: 0.0,
        tag: 1.0,
    });
    let criteria = SearchCriteria {
        tags: vec!["vegan".to_string(), "patio".to_string()],
        ..SearchCriteria::default()
    };

    let candidates = vec![create_restaurant(1, "American", None, None, Some(4.0), &["patio"])];
    let results = matcher.rank(&candidates, &criteria);

    // Only the tag sub-score contributes under these weights
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 0.5);
    assert!(results[0].explanation.contains("Tags matched: patio"));
}

#[test]
fn test_scenario_d_empty_candidates() {
    let matcher = Matcher::with_default_weights();
    let results = matcher.rank(&[], &SearchCriteria::default());
    assert!(results.is_empty());
}

#[test]
fn test_scenario_e_unrated_restaurant_scored() {
    let matcher = Matcher::with_default_weights();
    let candidates = vec![create_restaurant(1, "Thai", None, None, None, &[])];

    let results = matcher.rank(&candidates, &SearchCriteria::default());

    // 0.7 * 0.55 + 0.5 * 0.2 + 0 * 0.25
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 0.485);
    assert!(!results[0].explanation.contains("Rating"));
}

#[test]
fn test_every_result_passes_all_gates() {
    let matcher = Matcher::with_default_weights();
    let criteria = SearchCriteria {
        price_range: Some("$$".to_string()),
        tags: vec!["patio".to_string(), "vegan".to_string()],
        latitude: Some(37.78),
        longitude: Some(-122.42),
        radius_km: 5.0,
        ..SearchCriteria::default()
    };

    let mut candidates = Vec::new();
    for i in 0..40 {
        let tags: &[&str] = match i % 4 {
            0 => &["patio"],
            1 => &["vegan", "bar"],
            2 => &["bar"],
            _ => &[],
        };
        let lat = if i % 5 == 0 { None } else { Some(37.78 + i as f64 * 0.003) };
        let mut restaurant = create_restaurant(i, "Thai", lat, Some(-122.42), Some(3.0 + (i % 3) as f64), tags);
        if i % 7 == 0 {
            restaurant.price_range = "$$$$".to_string();
        }
        candidates.push(restaurant);
    }

    let results = matcher.rank(&candidates, &criteria);

    assert!(!results.is_empty());
    for result in &results {
        let r = &result.restaurant;
        assert_eq!(r.price_range, "$$");
        assert!(criteria.tags.iter().any(|t| r.has_tag(t)));
        if let Some(distance) = result.distance_km {
            assert!(distance <= criteria.radius_km);
        }
    }

    // Nothing retained twice, nothing invented
    let mut ids: Vec<i64> = results.iter().map(|r| r.restaurant.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), results.len());
}

#[test]
fn test_scores_bounded_and_rounded_under_default_weights() {
    let matcher = Matcher::with_default_weights();
    let criteria = SearchCriteria {
        tags: vec!["patio".to_string()],
        latitude: Some(37.78),
        longitude: Some(-122.42),
        radius_km: 50.0,
        ..SearchCriteria::default()
    };

    let candidates: Vec<RestaurantRecord> = (0..50)
        .map(|i| {
            create_restaurant(
                i,
                "Thai",
                Some(37.78 + i as f64 * 0.007),
                Some(-122.42),
                if i % 6 == 0 { None } else { Some((i % 11) as f64 * 0.5) },
                &["patio"],
            )
        })
        .collect();

    let results = matcher.rank(&candidates, &criteria);

    assert!(!results.is_empty());
    for result in &results {
        assert!(result.score >= 0.0 && result.score <= 1.0, "Score {} out of range", result.score);
        let scaled = result.score * 1000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6, "Score {} not at 3 decimals", result.score);
    }
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "Results not sorted by score");
    }
}

#[test]
fn test_ranking_is_deterministic() {
    let matcher = Matcher::with_default_weights();
    let criteria = SearchCriteria {
        latitude: Some(37.78),
        longitude: Some(-122.42),
        ..SearchCriteria::default()
    };

    let candidates: Vec<RestaurantRecord> = (0..30)
        .map(|i| create_restaurant(i, "Thai", Some(37.78 + (i % 4) as f64 * 0.01), Some(-122.42), Some(4.0), &[]))
        .collect();

    let first = matcher.rank(&candidates, &criteria);
    let second = matcher.rank(&candidates, &criteria);

    assert_eq!(first, second);

    // Equal scores keep input order
    let tied: Vec<i64> = first
        .iter()
        .filter(|r| r.score == first[0].score)
        .map(|r| r.restaurant.id)
        .collect();
    assert_eq!(tied, vec![0, 4, 8, 12, 16, 20, 24, 28]);
}

#[test]
fn test_best_match_on_sample_catalog() {
    let state = create_state(None);

    let response = best_match(&state, "lat=37.78&lng=-122.42&radius_km=10").unwrap();

    let ids: Vec<i64> = response.results.iter().map(|r| r.restaurant.id).collect();
    assert_eq!(ids, vec![1, 2, 13]);
    assert_eq!(response.count, 3);
    assert_eq!(response.message, "Matches found.");
    assert_eq!(response.results[0].score, 0.799);
    assert_eq!(response.results[1].score, 0.778);
    assert_eq!(response.results[2].score, 0.485);
    assert_eq!(response.results[2].distance_km, None);
    assert_eq!(
        response.results[0].explanation,
        "Cuisine matches • Price range matches • Within 0.6 km • Rating 4.5"
    );
}

#[test]
fn test_best_match_tags_and_city() {
    let state = create_state(None);

    let response = best_match(&state, "city=portland&tags=vegan,patio").unwrap();

    assert_eq!(response.count, 2);
    assert_eq!(response.results[0].restaurant.name, "Green Leaf Cafe");
    assert_eq!(response.results[0].score, 0.755);
    assert_eq!(response.results[1].restaurant.name, "Olive Grove");
    assert_eq!(response.results[1].score, 0.705);
    assert_eq!(response.criteria.city.as_deref(), Some("portland"));
    assert_eq!(response.criteria.radius_km, 25.0);
}

#[test]
fn test_best_match_unknown_location_survives_radius() {
    let state = create_state(None);

    let response = best_match(&state, "tags=vegan&lat=37.78&lng=-122.42").unwrap();

    assert_eq!(response.count, 1);
    assert_eq!(response.results[0].restaurant.name, "Corner Noodle");
    assert_eq!(response.results[0].score, 0.54);
    assert_eq!(
        response.results[0].explanation,
        "Cuisine matches • Price range matches • Tags matched: vegan"
    );
}

#[test]
fn test_best_match_no_results() {
    let state = create_state(None);

    let response = best_match(&state, "cuisine=Ethiopian").unwrap();

    assert_eq!(response.count, 0);
    assert!(response.results.is_empty());
    assert_eq!(response.message, "No matches found for the provided criteria.");
}

#[test]
fn test_best_match_respects_max_results() {
    let state = create_state(Some(2));

    let response = best_match(&state, "").unwrap();

    assert_eq!(response.count, 2);
}

#[test]
fn test_best_match_rejects_negative_radius() {
    let state = create_state(None);
    assert!(best_match(&state, "lat=37.78&lng=-122.42&radius_km=-1").is_err());
}

#[test]
fn test_run_list_and_summary() {
    let mut state = create_state(None);

    let listed = commands::run(&mut state, Command::List, "state=ny&sort=rating_desc").unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Sakura Sushi", "Pizza Corner"]);

    let summary = commands::run(&mut state, Command::Summary, "").unwrap();
    assert_eq!(summary["countByCuisine"][0]["cuisine"], "American");
    assert_eq!(summary["countByCuisine"][0]["count"], 2);
    assert_eq!(summary["avgRatingByCity"][0]["city"], "Boston");
}

#[test]
fn test_run_create_then_search() {
    let mut state = create_state(None);

    let created = commands::run(
        &mut state,
        Command::Create,
        r#"{"name": "Cafe Colucci", "city": "Oakland", "state": "CA", "cuisine": "Ethiopian",
            "price_range": "$$", "rating": "4.4", "tags": "injera, vegan, injera"}"#,
    )
    .unwrap();

    assert_eq!(created["id"], 14);
    assert_eq!(created["rating"], 4.4);
    assert_eq!(created["tags"], serde_json::json!(["injera", "vegan"]));

    let response = best_match(&state, "cuisine=Ethiopian").unwrap();
    assert_eq!(response.count, 1);
    assert_eq!(response.results[0].restaurant.name, "Cafe Colucci");
}

#[test]
fn test_run_create_rejects_missing_fields() {
    let mut state = create_state(None);

    let result = commands::run(&mut state, Command::Create, r#"{"name": "Cafe Colucci"}"#);

    assert!(matches!(
        result,
        Err(CommandError::Catalog(CatalogError::MissingFields(_)))
    ));
    assert_eq!(state.catalog.len(), 13);
}

#[test]
fn test_run_update() {
    let mut state = create_state(None);
    let body = r#"{"id": 13, "name": "Corner Noodle", "city": "Oakland", "state": "CA",
        "cuisine": "Chinese", "price_range": "$", "latitude": 37.8044, "longitude": -122.2712,
        "tags": ["takeout", "vegan", "late-night"]}"#;

    let updated = commands::run(&mut state, Command::Update, body).unwrap();

    assert_eq!(updated["latitude"], 37.8044);
    assert_eq!(updated["tags"][2], "late-night");
    assert_eq!(state.catalog.len(), 13);

    // Missing target and missing id
    let missing = body.replace("\"id\": 13", "\"id\": 99");
    assert!(matches!(
        commands::run(&mut state, Command::Update, &missing),
        Err(CommandError::Catalog(CatalogError::NotFound(99)))
    ));
    let no_id = body.replace("\"id\": 13, ", "");
    assert!(matches!(
        commands::run(&mut state, Command::Update, &no_id),
        Err(CommandError::Request(_))
    ));
}

#[test]
fn test_distance_accuracy() {
    let sf = (37.7749, -122.4194);

    let distance = haversine_distance(sf.0, sf.1, sf.0, sf.1);
    assert!(distance.abs() < 0.01);

    // Bella Italia to Thai Garden in the sample catalog
    let distance = haversine_distance(sf.0, sf.1, 37.7849, -122.4094);
    assert!((distance - 1.417).abs() < 0.001, "Expected ~1.417km, got {}", distance);
}
