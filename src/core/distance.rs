use crate::models::{RestaurantRecord, SearchCriteria};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// Inputs must be valid degrees (latitude in [-90, 90], longitude in
/// [-180, 180]). Out-of-range values produce a number, not an error.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from the search origin to a restaurant
///
/// `None` when either side lacks coordinates.
#[inline]
pub fn distance_from_origin(restaurant: &RestaurantRecord, criteria: &SearchCriteria) -> Option<f64> {
    let (origin_lat, origin_lon) = criteria.origin()?;
    let (lat, lon) = restaurant.coordinates()?;
    Some(haversine_distance(origin_lat, origin_lon, lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant_at(latitude: Option<f64>, longitude: Option<f64>) -> RestaurantRecord {
        RestaurantRecord {
            id: 1,
            name: "Bella Italia".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            latitude,
            longitude,
            cuisine: "Italian".to_string(),
            price_range: "$$$".to_string(),
            rating: Some(4.5),
            tags: vec![],
            notes: None,
        }
    }

    #[test]
    fn test_haversine_distance() {
        // Distance from London to Paris (approximately 344 km)
        let london_lat = 51.5074;
        let london_lon = -0.1278;
        let paris_lat = 48.8566;
        let paris_lon = 2.3522;

        let distance = haversine_distance(london_lat, london_lon, paris_lat, paris_lon);
        assert!((distance - 343.556).abs() < 0.01, "Distance should be ~343.6km, got {}", distance);
    }

    #[test]
    fn test_haversine_is_symmetric_and_non_negative() {
        let there = haversine_distance(37.7749, -122.4194, 40.7128, -74.0060);
        let back = haversine_distance(40.7128, -74.0060, 37.7749, -122.4194);

        assert!(there > 0.0);
        assert!((there - back).abs() < 1e-9);
        assert_eq!(haversine_distance(10.0, 20.0, 10.0, 20.0), 0.0);
    }

    #[test]
    fn test_distance_from_origin() {
        let criteria = SearchCriteria {
            latitude: Some(40.7128),
            longitude: Some(-74.0060),
            ..SearchCriteria::default()
        };

        let distance = distance_from_origin(&restaurant_at(Some(40.7228), Some(-74.0060)), &criteria)
            .expect("both sides have coordinates");
        assert!((distance - 1.112).abs() < 0.001, "Expected ~1.112km, got {}", distance);
    }

    #[test]
    fn test_distance_unknown_without_coordinates() {
        let criteria = SearchCriteria {
            latitude: Some(40.7128),
            longitude: Some(-74.0060),
            ..SearchCriteria::default()
        };
        assert_eq!(distance_from_origin(&restaurant_at(None, Some(-74.0)), &criteria), None);

        let no_origin = SearchCriteria::default();
        assert_eq!(distance_from_origin(&restaurant_at(Some(40.7), Some(-74.0)), &no_origin), None);
    }
}
