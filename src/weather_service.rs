//! This module provides the main entry point of the crate: the weather service that
//! turns a grid of coordinates into a [`GlobalDataset`] of current observations.

use crate::config::ServiceConfig;
use crate::error::WeatherGlobeError;
use crate::providers::{
    CloudCoverSource, MeteorologicalSource, OpenMeteoClient, OpenWeatherMapClient,
};
use crate::types::coordinate::LatLon;
use crate::types::dataset::GlobalDataset;
use crate::types::grid::GridSpec;
use crate::types::observation::WeatherObservation;
use crate::utils::now_millis;
use crate::weather_data::cache::{ObservationCache, DEFAULT_CACHE_TTL};
use crate::weather_data::point_fetcher::PointFetcher;
use bon::bon;
use futures_util::future::join_all;
use log::{error, info, warn};
use std::time::Duration;

/// Fetches, merges and caches current weather for single points and for a whole grid.
///
/// A service owns one in-process observation cache. Build it once and share it
/// (typically as an `Arc`) between every caller that needs weather data, including a
/// [`crate::WeatherPoller`].
///
/// The two upstream providers are generic so tests and alternative backends can be
/// injected. By default they are the reqwest clients for Open-Meteo and OpenWeatherMap.
///
/// # Examples
///
/// ```rust
/// # use weather_globe::{GridSpec, OpenMeteoClient, OpenWeatherMapClient, WeatherService};
/// # use weather_globe::WeatherGlobeError;
/// # use std::time::Duration;
/// # fn run() -> Result<(), WeatherGlobeError> {
/// let service = WeatherService::builder()
///     .meteorological(OpenMeteoClient::default())
///     .cloud(OpenWeatherMapClient::new(
///         "https://api.openweathermap.org/data/2.5",
///         Some("my-api-key".to_string()),
///     ))
///     .grid(GridSpec::builder().step(30.0).lat_min(-60.0).lat_max(60.0).build()?)
///     .cache_ttl(Duration::from_secs(120))
///     .build();
/// assert_eq!(service.grid().len(), 65);
/// # Ok(())
/// # }
/// ```
pub struct WeatherService<M = OpenMeteoClient, C = OpenWeatherMapClient> {
    fetcher: PointFetcher<M, C>,
    grid: GridSpec,
}

#[bon]
impl<M: MeteorologicalSource, C: CloudCoverSource> WeatherService<M, C> {
    /// Creates a new service.
    ///
    /// # Arguments
    ///
    /// * `.meteorological(M)`: **Required.** Provider of temperature, precipitation and wind.
    /// * `.cloud(C)`: **Required.** Provider of cloud cover.
    /// * `.grid(GridSpec)`: Optional. The grid sampled by [`WeatherService::global_dataset`].
    ///   Defaults to the whole globe at a 30° step.
    /// * `.cache_ttl(Duration)`: Optional. How long an observation is reused. Defaults to 5 minutes.
    #[builder]
    pub fn new(
        meteorological: M,
        cloud: C,
        grid: Option<GridSpec>,
        cache_ttl: Option<Duration>,
    ) -> Self {
        Self {
            fetcher: PointFetcher::new(
                meteorological,
                cloud,
                cache_ttl.unwrap_or(DEFAULT_CACHE_TTL),
            ),
            grid: grid.unwrap_or_default(),
        }
    }

    /// The grid sampled by [`WeatherService::global_dataset`].
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// The per-coordinate cache shared by point and global fetches.
    pub fn cache(&self) -> &ObservationCache {
        self.fetcher.cache()
    }

    /// Returns the current observation at one coordinate.
    ///
    /// A cached observation younger than the TTL is returned without any network call.
    /// Otherwise both providers are queried concurrently, the results are merged, stamped
    /// with the current time and cached.
    ///
    /// # Errors
    ///
    /// * [`WeatherGlobeError::InvalidCoordinate`] if the coordinate lies outside
    ///   `[-90, 90] x [-180, 180]`.
    /// * [`WeatherGlobeError::PointFetch`] if the meteorological provider fails. A cloud
    ///   cover failure is not an error; the observation then reports 0% clouds.
    pub async fn point_observation(
        &self,
        coordinate: LatLon,
    ) -> Result<WeatherObservation, WeatherGlobeError> {
        self.fetcher.observation(coordinate).await
    }

    /// Fetches every coordinate of the configured grid concurrently.
    ///
    /// Never fails: a point whose fetch fails is logged and replaced by a zero-valued
    /// placeholder carrying its coordinate, so the dataset always has one observation
    /// per grid coordinate, in grid order.
    pub async fn global_dataset(&self) -> GlobalDataset {
        let coordinates = self.grid.coordinates();
        info!("Fetching weather for {} grid points", coordinates.len());

        let requests: Vec<_> = coordinates
            .iter()
            .map(|&coordinate| self.point_or_placeholder(coordinate))
            .collect();
        let results = join_all(requests).await;

        let mut placeholder_count = 0;
        let observations = results
            .into_iter()
            .map(|(observation, substituted)| {
                if substituted {
                    placeholder_count += 1;
                }
                observation
            })
            .collect::<Vec<_>>();

        if placeholder_count > 0 {
            warn!(
                "{} of {} grid points were replaced by placeholders",
                placeholder_count,
                observations.len()
            );
        }
        info!("Fetched weather for {} grid points", observations.len());
        GlobalDataset::new(observations, placeholder_count)
    }

    async fn point_or_placeholder(&self, coordinate: LatLon) -> (WeatherObservation, bool) {
        match self.fetcher.observation(coordinate).await {
            Ok(observation) => (observation, false),
            Err(e) => {
                error!("Error fetching data for {}: {}", coordinate, e);
                (WeatherObservation::placeholder(coordinate, now_millis()), true)
            }
        }
    }
}

impl WeatherService {
    /// Wires the Open-Meteo and OpenWeatherMap clients from a [`ServiceConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`WeatherGlobeError::InvalidGrid`] if the configured grid step is invalid.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, WeatherGlobeError> {
        let grid = GridSpec::global(config.grid_step)?;
        Ok(Self::builder()
            .meteorological(OpenMeteoClient::new(config.open_meteo_url.clone()))
            .cloud(OpenWeatherMapClient::new(
                config.open_weather_map_url.clone(),
                config.open_weather_map_api_key.clone(),
            ))
            .grid(grid)
            .cache_ttl(config.cache_ttl)
            .build())
    }
}
