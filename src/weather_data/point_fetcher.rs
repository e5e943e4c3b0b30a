use crate::error::WeatherGlobeError;
use crate::providers::{CloudCoverSource, MeteorologicalSource};
use crate::types::coordinate::LatLon;
use crate::types::observation::WeatherObservation;
use crate::utils::now_millis;
use crate::weather_data::cache::ObservationCache;
use log::{debug, warn};
use std::time::Duration;

/// Merges the two providers into one observation per coordinate, behind the cache.
pub struct PointFetcher<M, C> {
    meteorological: M,
    cloud: C,
    cache: ObservationCache,
}

impl<M: MeteorologicalSource, C: CloudCoverSource> PointFetcher<M, C> {
    pub fn new(meteorological: M, cloud: C, cache_ttl: Duration) -> Self {
        Self {
            meteorological,
            cloud,
            cache: ObservationCache::new(cache_ttl),
        }
    }

    pub fn cache(&self) -> &ObservationCache {
        &self.cache
    }

    /// Returns a cached observation younger than the TTL, or fetches a fresh one.
    ///
    /// Both providers are queried concurrently. Only a primary failure is an error;
    /// a cloud failure is logged and the observation gets a cloud cover of 0.
    pub async fn observation(
        &self,
        coordinate: LatLon,
    ) -> Result<WeatherObservation, WeatherGlobeError> {
        if !coordinate.is_valid() {
            return Err(WeatherGlobeError::InvalidCoordinate(coordinate.0, coordinate.1));
        }

        let key = coordinate.key();
        if let Some(cached) = self.cache.get_fresh(&key).await {
            debug!("Cache hit for {}", coordinate);
            return Ok(cached);
        }

        let (conditions, clouds) = tokio::join!(
            self.meteorological.current_conditions(coordinate),
            self.cloud.cloud_cover(coordinate)
        );

        let conditions = conditions.map_err(|source| WeatherGlobeError::PointFetch {
            latitude: coordinate.0,
            longitude: coordinate.1,
            source,
        })?;

        let clouds = clouds.unwrap_or_else(|e| {
            warn!(
                "Failed to fetch cloud data for {}, using default value: {}",
                coordinate, e
            );
            0.0
        });

        let observation = WeatherObservation {
            latitude: coordinate.0,
            longitude: coordinate.1,
            temperature: conditions.temperature,
            precipitation: conditions.precipitation,
            wind_speed: conditions.wind_speed,
            wind_direction: conditions.wind_direction,
            clouds,
            timestamp: now_millis(),
        };
        self.cache.insert(key, observation).await;
        Ok(observation)
    }
}
