//! Live weather observations on a global latitude/longitude grid, ready to be drawn on
//! a 3D globe.
//!
//! [`WeatherService`] fetches current conditions for every grid point from two upstream
//! providers, merges them, and caches each point for a short TTL. [`WeatherPoller`]
//! keeps a [`GlobalDataset`] fresh on a timer. The [`geo`], [`color`] and [`overlay`]
//! modules turn a dataset into positions, colors and markers for a renderer.

pub mod color;
mod config;
mod error;
pub mod geo;
pub mod overlay;
mod providers;
mod refresh;
mod types;
mod utils;
mod weather_data;
mod weather_service;

#[cfg(test)]
mod test_support;

pub use config::ServiceConfig;
pub use error::WeatherGlobeError;
pub use weather_service::WeatherService;

pub use providers::error::ProviderError;
pub use providers::open_meteo::DEFAULT_OPEN_METEO_URL;
pub use providers::open_weather_map::DEFAULT_OPEN_WEATHER_MAP_URL;
pub use providers::{
    CloudCoverSource, CurrentConditions, MeteorologicalSource, OpenMeteoClient,
    OpenWeatherMapClient,
};

pub use refresh::{RefreshState, WeatherPoller, DEFAULT_REFRESH_INTERVAL};
pub use weather_data::cache::{ObservationCache, DEFAULT_CACHE_TTL};

pub use types::coordinate::{CoordinateKey, LatLon};
pub use types::dataset::GlobalDataset;
pub use types::display_mode::DisplayMode;
pub use types::grid::{GridSpec, DEFAULT_GRID_STEP, MAX_GRID_POINTS};
pub use types::observation::WeatherObservation;

pub use color::Rgb;
pub use geo::{great_circle_distance, project, unproject, EARTH_RADIUS_KM};
pub use overlay::{Overlay, PointMarker, WindParticle};
