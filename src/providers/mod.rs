//! Upstream weather providers.
//!
//! The weather service talks to two independent APIs through the
//! [`MeteorologicalSource`] and [`CloudCoverSource`] traits. The crate ships reqwest
//! implementations for Open-Meteo ([`OpenMeteoClient`]) and OpenWeatherMap
//! ([`OpenWeatherMapClient`]); any other type implementing the traits can be injected
//! into [`crate::WeatherService`] instead.

pub mod error;
mod http;
pub mod open_meteo;
pub mod open_weather_map;

use crate::providers::error::ProviderError;
use crate::types::coordinate::LatLon;
use std::future::Future;
use std::sync::Arc;

pub use open_meteo::OpenMeteoClient;
pub use open_weather_map::OpenWeatherMapClient;

/// Current conditions reported by the primary meteorological provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Precipitation in mm/h.
    pub precipitation: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Wind direction in degrees.
    pub wind_direction: f64,
}

/// The primary provider: temperature, precipitation and wind.
///
/// A failure here is fatal to the point being fetched.
pub trait MeteorologicalSource: Send + Sync {
    fn current_conditions(
        &self,
        coordinate: LatLon,
    ) -> impl Future<Output = Result<CurrentConditions, ProviderError>> + Send;
}

/// The secondary provider: cloud cover percentage.
///
/// A failure here is recovered by the service with a cloud cover of 0.
pub trait CloudCoverSource: Send + Sync {
    fn cloud_cover(
        &self,
        coordinate: LatLon,
    ) -> impl Future<Output = Result<f64, ProviderError>> + Send;
}

impl<T: MeteorologicalSource> MeteorologicalSource for Arc<T> {
    fn current_conditions(
        &self,
        coordinate: LatLon,
    ) -> impl Future<Output = Result<CurrentConditions, ProviderError>> + Send {
        (**self).current_conditions(coordinate)
    }
}

impl<T: CloudCoverSource> CloudCoverSource for Arc<T> {
    fn cloud_cover(
        &self,
        coordinate: LatLon,
    ) -> impl Future<Output = Result<f64, ProviderError>> + Send {
        (**self).cloud_cover(coordinate)
    }
}
