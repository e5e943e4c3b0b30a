use crate::providers::error::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherGlobeError {
    #[error("Failed to fetch weather data for ({latitude}, {longitude}): {source}")]
    PointFetch {
        latitude: f64,
        longitude: f64,
        #[source]
        source: ProviderError,
    },

    #[error("Coordinate ({0}, {1}) is outside [-90, 90] x [-180, 180]")]
    InvalidCoordinate(f64, f64),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Unknown display mode '{0}'")]
    UnknownDisplayMode(String),
}
