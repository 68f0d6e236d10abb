use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

use crate::models::{WeightConfiguration, DEFAULT_RADIUS_KM};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    #[validate(nested)]
    pub search: SearchSettings,
    #[serde(default)]
    #[validate(nested)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String { "data/restaurants.json".to_string() }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchSettings {
    #[serde(default = "default_radius_km")]
    #[validate(range(exclusive_min = 0.0))]
    pub default_radius_km: f64,
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            max_results: None,
        }
    }
}

fn default_radius_km() -> f64 { DEFAULT_RADIUS_KM }

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ScoringSettings {
    #[serde(default)]
    #[validate(nested)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WeightsConfig {
    #[serde(default = "default_attribute_weight")]
    #[validate(range(min = 0.0))]
    pub attribute: f64,
    #[serde(default = "default_distance_weight")]
    #[validate(range(min = 0.0))]
    pub distance: f64,
    #[serde(default = "default_rating_weight")]
    #[validate(range(min = 0.0))]
    pub rating: f64,
    #[serde(default = "default_cuisine_weight")]
    #[validate(range(min = 0.0))]
    pub cuisine: f64,
    #[serde(default = "default_price_weight")]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default = "default_tag_weight")]
    #[validate(range(min = 0.0))]
    pub tag: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            attribute: default_attribute_weight(),
            distance: default_distance_weight(),
            rating: default_rating_weight(),
            cuisine: default_cuisine_weight(),
            price: default_price_weight(),
            tag: default_tag_weight(),
        }
    }
}

fn default_attribute_weight() -> f64 { 0.55 }
fn default_distance_weight() -> f64 { 0.20 }
fn default_rating_weight() -> f64 { 0.25 }
fn default_cuisine_weight() -> f64 { 0.40 }
fn default_price_weight() -> f64 { 0.20 }
fn default_tag_weight() -> f64 { 0.20 }

impl WeightsConfig {
    pub fn to_weights(&self) -> WeightConfiguration {
        WeightConfiguration {
            attribute: self.attribute,
            distance: self.distance,
            rating: self.rating,
            cuisine: self.cuisine,
            price: self.price,
            tag: self.tag,
        }
    }

    fn all_finite(&self) -> bool {
        [self.attribute, self.distance, self.rating, self.cuisine, self.price, self.tag]
            .iter()
            .all(|w| w.is_finite())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCHER__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCHER__SEARCH__DEFAULT_RADIUS_KM -> search.default_radius_km
            .add_source(
                Environment::with_prefix("MATCHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<Self>()?.checked()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MATCHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<Self>()?.checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Message(format!("Invalid configuration: {}", e)))?;

        if !self.scoring.weights.all_finite() || !self.search.default_radius_km.is_finite() {
            return Err(ConfigError::Message(
                "Invalid configuration: weights and radius must be finite".to_string(),
            ));
        }

        Ok(self)
    }
}
