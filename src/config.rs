//! Environment-driven service configuration.

use crate::providers::open_meteo::DEFAULT_OPEN_METEO_URL;
use crate::providers::open_weather_map::DEFAULT_OPEN_WEATHER_MAP_URL;
use crate::refresh::DEFAULT_REFRESH_INTERVAL;
use crate::types::grid::{GridSpec, DEFAULT_GRID_STEP};
use crate::weather_data::cache::DEFAULT_CACHE_TTL;
use log::warn;
use std::str::FromStr;
use std::time::Duration;

pub const OPEN_METEO_API_URL: &str = "OPEN_METEO_API_URL";
pub const OPEN_WEATHER_MAP_API_URL: &str = "OPEN_WEATHER_MAP_API_URL";
pub const OPEN_WEATHER_MAP_API_KEY: &str = "OPEN_WEATHER_MAP_API_KEY";
pub const GRID_STEP: &str = "WEATHER_GLOBE_GRID_STEP";
pub const CACHE_TTL_SECS: &str = "WEATHER_GLOBE_CACHE_TTL_SECS";
pub const REFRESH_SECS: &str = "WEATHER_GLOBE_REFRESH_SECS";

/// Settings for a [`crate::WeatherService`] and its [`crate::WeatherPoller`].
///
/// Loading never fails. Every missing or unusable variable is reported with a
/// `warn!` and replaced by its default; a missing OpenWeatherMap key only surfaces
/// later as a per-call cloud cover failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub open_meteo_url: String,
    pub open_weather_map_url: String,
    pub open_weather_map_api_key: Option<String>,
    /// Grid spacing in degrees.
    pub grid_step: f64,
    pub cache_ttl: Duration,
    pub refresh_interval: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            open_meteo_url: DEFAULT_OPEN_METEO_URL.to_string(),
            open_weather_map_url: DEFAULT_OPEN_WEATHER_MAP_URL.to_string(),
            open_weather_map_api_key: None,
            grid_step: DEFAULT_GRID_STEP,
            cache_ttl: DEFAULT_CACHE_TTL,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl ServiceConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let open_meteo_url = lookup(OPEN_METEO_API_URL).unwrap_or_else(|| {
            warn!("{} is not set, using {}", OPEN_METEO_API_URL, defaults.open_meteo_url);
            defaults.open_meteo_url.clone()
        });
        let open_weather_map_url = lookup(OPEN_WEATHER_MAP_API_URL).unwrap_or_else(|| {
            warn!(
                "{} is not set, using {}",
                OPEN_WEATHER_MAP_API_URL, defaults.open_weather_map_url
            );
            defaults.open_weather_map_url.clone()
        });
        let open_weather_map_api_key = lookup(OPEN_WEATHER_MAP_API_KEY);
        if open_weather_map_api_key.is_none() {
            warn!(
                "{} is not set, cloud cover will default to 0",
                OPEN_WEATHER_MAP_API_KEY
            );
        }

        let grid_step = parse_or_default(lookup(GRID_STEP), GRID_STEP, defaults.grid_step, |step| {
            GridSpec::global(*step).is_ok()
        });
        let cache_ttl = parse_or_default(
            lookup(CACHE_TTL_SECS),
            CACHE_TTL_SECS,
            defaults.cache_ttl.as_secs(),
            |_| true,
        );
        let refresh_secs = parse_or_default(
            lookup(REFRESH_SECS),
            REFRESH_SECS,
            defaults.refresh_interval.as_secs(),
            |secs| *secs > 0,
        );

        Self {
            open_meteo_url,
            open_weather_map_url,
            open_weather_map_api_key,
            grid_step,
            cache_ttl: Duration::from_secs(cache_ttl),
            refresh_interval: Duration::from_secs(refresh_secs),
        }
    }
}

fn parse_or_default<T>(
    raw: Option<String>,
    name: &str,
    default: T,
    is_valid: impl Fn(&T) -> bool,
) -> T
where
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if is_valid(&value) => value,
        _ => {
            warn!("{} has unusable value '{}', using {}", name, raw, default);
            default
        }
    }
}
