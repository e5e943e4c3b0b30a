//! The normalized per-point weather record and its spatial-index glue.

use crate::types::coordinate::LatLon;
use rstar::{PointDistance, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

/// Current weather at one grid point, merged from the meteorological and cloud providers.
///
/// Observations are produced fresh by a fetch or handed out from the cache; they are
/// never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    /// Latitude in decimal degrees, exactly as requested.
    pub latitude: f64,
    /// Longitude in decimal degrees, exactly as requested.
    pub longitude: f64,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Precipitation in mm/h.
    pub precipitation: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Direction the wind comes from, in degrees (0–360).
    pub wind_direction: f64,
    /// Cloud cover percentage (0–100).
    pub clouds: f64,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl WeatherObservation {
    /// A zero-valued observation standing in for a point whose fetch failed.
    pub fn placeholder(coordinate: LatLon, timestamp: i64) -> Self {
        Self {
            latitude: coordinate.0,
            longitude: coordinate.1,
            temperature: 0.0,
            precipitation: 0.0,
            wind_speed: 0.0,
            wind_direction: 0.0,
            clouds: 0.0,
            timestamp,
        }
    }

    pub fn coordinate(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

/// Lets an [`rstar::RTree`] index observations by their (latitude, longitude) point.
impl RTreeObject for WeatherObservation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.latitude, self.longitude])
    }
}

impl PointDistance for WeatherObservation {
    /// Squared planar distance in degree space. Only used to rank candidates; the
    /// dataset re-ranks them by great-circle distance afterwards.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.latitude - point[0];
        let dy = self.longitude - point[1];
        dx * dx + dy * dy
    }
}
