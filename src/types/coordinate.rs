//! Geographic coordinates and the exact keys used to index per-point caches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed precision of [`CoordinateKey`]: one micro-degree.
const KEY_SCALE: f64 = 1_000_000.0;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are decimal degrees represented as `f64`.
///
/// # Examples
///
/// ```
/// use weather_globe::LatLon;
///
/// let berlin_center = LatLon(52.5200, 13.4050);
/// assert_eq!(berlin_center.0, 52.5200); // Latitude
/// assert_eq!(berlin_center.1, 13.4050); // Longitude
/// assert!(berlin_center.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Returns `true` when the latitude lies in `[-90, 90]` and the longitude in `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.0) && (-180.0..=180.0).contains(&self.1)
    }

    /// The exact cache key for this coordinate.
    pub fn key(&self) -> CoordinateKey {
        CoordinateKey::from(*self)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Collision-free key for a coordinate pair.
///
/// Both axes are stored as whole micro-degrees, so two coordinates map to the
/// same key only if they agree to six decimal places. Grid points are always
/// at least one grid step apart, which keeps the key/coordinate mapping a
/// bijection over any grid this crate generates.
///
/// ```
/// use weather_globe::LatLon;
///
/// assert_eq!(LatLon(-60.0, 30.0).key(), LatLon(-60.0, 30.0).key());
/// assert_ne!(LatLon(-60.0, 30.0).key(), LatLon(30.0, -60.0).key());
/// assert_eq!(LatLon(12.5, -7.25).key().coordinate(), LatLon(12.5, -7.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateKey {
    latitude_micro: i64,
    longitude_micro: i64,
}

impl CoordinateKey {
    /// Decodes the key back into the coordinate it was built from (to micro-degree precision).
    pub fn coordinate(&self) -> LatLon {
        LatLon(
            self.latitude_micro as f64 / KEY_SCALE,
            self.longitude_micro as f64 / KEY_SCALE,
        )
    }
}

impl From<LatLon> for CoordinateKey {
    fn from(value: LatLon) -> Self {
        Self {
            latitude_micro: (value.0 * KEY_SCALE).round() as i64,
            longitude_micro: (value.1 * KEY_SCALE).round() as i64,
        }
    }
}

impl fmt::Display for CoordinateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.latitude_micro, self.longitude_micro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::grid::GridSpec;
    use std::collections::HashSet;

    #[test]
    fn test_validity_bounds() {
        assert!(LatLon(90.0, 180.0).is_valid());
        assert!(LatLon(-90.0, -180.0).is_valid());
        assert!(!LatLon(90.5, 0.0).is_valid());
        assert!(!LatLon(0.0, -180.01).is_valid());
        assert!(!LatLon(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_keys_are_unique_over_fine_grid() {
        let grid = GridSpec::builder().step(0.5).build().unwrap();
        let coordinates = grid.coordinates();
        let keys: HashSet<CoordinateKey> = coordinates.iter().map(LatLon::key).collect();
        assert_eq!(keys.len(), coordinates.len());
    }

    #[test]
    fn test_key_round_trips_grid_coordinates() {
        let grid = GridSpec::builder().step(15.0).build().unwrap();
        for coordinate in grid.coordinates() {
            assert_eq!(coordinate.key().coordinate(), coordinate);
        }
    }

    #[test]
    fn test_nearby_floats_share_a_key() {
        // 0.1 + 0.2 formats differently from 0.3 but is the same point.
        assert_eq!(LatLon(0.1 + 0.2, 10.0).key(), LatLon(0.3, 10.0).key());
    }
}
