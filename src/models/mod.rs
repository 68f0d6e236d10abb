// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CatalogSummary, CityRating, CuisineCount, ListFilters, MatchResult, RestaurantRecord,
    SearchCriteria, SortOrder, WeightConfiguration, DEFAULT_RADIUS_KM,
};
pub use requests::{BestMatchQuery, ListQuery, QueryParams, RequestError, RestaurantInput};
pub use responses::{BestMatchResponse, CriteriaEcho, ErrorResponse};
