//! The rectangular latitude/longitude sampling grid.

use crate::error::WeatherGlobeError;
use crate::types::coordinate::LatLon;
use bon::bon;

/// Default spacing between grid points, in degrees.
pub const DEFAULT_GRID_STEP: f64 = 30.0;

/// Largest number of coordinates a grid may have. Every point costs a pair of
/// upstream requests per refresh.
pub const MAX_GRID_POINTS: usize = 1_000_000;

// Absorbs float noise when the span is an exact multiple of the step.
const STEP_EPSILON: f64 = 1e-9;

/// A fixed rectangular grid of sampling coordinates.
///
/// The grid covers `[lat_min, lat_max] x [lon_min, lon_max]` inclusive at a constant
/// step. The step is the main load-control knob: every grid point costs one pair of
/// upstream requests per refresh (unless cached), so a coarser step means fewer calls.
///
/// # Examples
///
/// ```
/// use weather_globe::{GridSpec, LatLon};
///
/// let grid = GridSpec::builder()
///     .step(30.0)
///     .lat_min(-60.0)
///     .lat_max(60.0)
///     .build()
///     .unwrap();
///
/// let coordinates = grid.coordinates();
/// assert_eq!(coordinates.len(), 5 * 13);
/// assert_eq!(coordinates[0], LatLon(-60.0, -180.0));
/// assert_eq!(coordinates[1], LatLon(-60.0, -150.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    step: f64,
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

#[bon]
impl GridSpec {
    /// Builds and validates a grid.
    ///
    /// # Arguments
    ///
    /// * `.step(f64)`: Optional. Spacing in degrees on both axes. Defaults to [`DEFAULT_GRID_STEP`].
    /// * `.lat_min(f64)` / `.lat_max(f64)`: Optional. Latitude bounds. Default to `-90` / `90`.
    /// * `.lon_min(f64)` / `.lon_max(f64)`: Optional. Longitude bounds. Default to `-180` / `180`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherGlobeError::InvalidGrid`] if the step is not a positive finite
    /// number, if a bound lies outside the valid coordinate range, or if a minimum
    /// exceeds its maximum.
    #[builder]
    pub fn new(
        step: Option<f64>,
        lat_min: Option<f64>,
        lat_max: Option<f64>,
        lon_min: Option<f64>,
        lon_max: Option<f64>,
    ) -> Result<Self, WeatherGlobeError> {
        let grid = Self {
            step: step.unwrap_or(DEFAULT_GRID_STEP),
            lat_min: lat_min.unwrap_or(-90.0),
            lat_max: lat_max.unwrap_or(90.0),
            lon_min: lon_min.unwrap_or(-180.0),
            lon_max: lon_max.unwrap_or(180.0),
        };
        grid.validate()?;
        Ok(grid)
    }

    /// A grid spanning the whole globe at the given step.
    pub fn global(step: f64) -> Result<Self, WeatherGlobeError> {
        Self::builder().step(step).build()
    }

    fn validate(&self) -> Result<(), WeatherGlobeError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(WeatherGlobeError::InvalidGrid(format!(
                "step must be a positive number of degrees, got {}",
                self.step
            )));
        }
        if !(LatLon(self.lat_min, self.lon_min).is_valid()
            && LatLon(self.lat_max, self.lon_max).is_valid())
        {
            return Err(WeatherGlobeError::InvalidGrid(format!(
                "bounds [{}, {}] x [{}, {}] exceed [-90, 90] x [-180, 180]",
                self.lat_min, self.lat_max, self.lon_min, self.lon_max
            )));
        }
        if self.lat_min > self.lat_max || self.lon_min > self.lon_max {
            return Err(WeatherGlobeError::InvalidGrid(format!(
                "bounds [{}, {}] x [{}, {}] are inverted",
                self.lat_min, self.lat_max, self.lon_min, self.lon_max
            )));
        }
        // Counted in f64: a tiny step would overflow usize.
        let points = Self::axis_span(self.lat_min, self.lat_max, self.step)
            * Self::axis_span(self.lon_min, self.lon_max, self.step);
        if points > MAX_GRID_POINTS as f64 {
            return Err(WeatherGlobeError::InvalidGrid(format!(
                "step {} yields {:.0} points, more than the limit of {}",
                self.step, points, MAX_GRID_POINTS
            )));
        }
        Ok(())
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    fn axis_span(min: f64, max: f64, step: f64) -> f64 {
        ((max - min) / step + STEP_EPSILON).floor() + 1.0
    }

    fn axis_len(min: f64, max: f64, step: f64) -> usize {
        Self::axis_span(min, max, step) as usize
    }

    pub fn latitude_count(&self) -> usize {
        Self::axis_len(self.lat_min, self.lat_max, self.step)
    }

    pub fn longitude_count(&self) -> usize {
        Self::axis_len(self.lon_min, self.lon_max, self.step)
    }

    /// Number of coordinates [`GridSpec::coordinates`] yields.
    pub fn len(&self) -> usize {
        self.latitude_count() * self.longitude_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All grid coordinates, latitude-major: every longitude of the lowest latitude
    /// first, then the next latitude, and so on.
    ///
    /// Points are computed as `min + i * step` rather than by repeated addition, so
    /// rounding error does not accumulate along an axis.
    pub fn coordinates(&self) -> Vec<LatLon> {
        let longitude_count = self.longitude_count();
        let mut coordinates = Vec::with_capacity(self.len());
        for lat_index in 0..self.latitude_count() {
            let latitude = self.lat_min + lat_index as f64 * self.step;
            for lon_index in 0..longitude_count {
                let longitude = self.lon_min + lon_index as f64 * self.step;
                coordinates.push(LatLon(latitude, longitude));
            }
        }
        coordinates
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            step: DEFAULT_GRID_STEP,
            lat_min: -90.0,
            lat_max: 90.0,
            lon_min: -180.0,
            lon_max: 180.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_spans_globe() {
        let grid = GridSpec::default();
        assert_eq!(grid.latitude_count(), 7);
        assert_eq!(grid.longitude_count(), 13);
        let coordinates = grid.coordinates();
        assert_eq!(coordinates.len(), 91);
        assert_eq!(coordinates.first(), Some(&LatLon(-90.0, -180.0)));
        assert_eq!(coordinates.last(), Some(&LatLon(90.0, 180.0)));
    }

    #[test]
    fn test_mid_latitude_grid_order() {
        let grid = GridSpec::builder()
            .step(30.0)
            .lat_min(-60.0)
            .lat_max(60.0)
            .lon_min(-180.0)
            .lon_max(180.0)
            .build()
            .unwrap();
        let coordinates = grid.coordinates();
        assert_eq!(coordinates.len(), 65);
        assert_eq!(grid.len(), 65);
        assert_eq!(coordinates[0], LatLon(-60.0, -180.0));
        assert_eq!(coordinates[12], LatLon(-60.0, 180.0));
        assert_eq!(coordinates[13], LatLon(-30.0, -180.0));
        assert_eq!(coordinates[64], LatLon(60.0, 180.0));

        // Latitude-major: latitudes never decrease, longitudes restart on each row.
        for pair in coordinates.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
            if pair[0].0 == pair[1].0 {
                assert!(pair[0].1 < pair[1].1);
            }
        }
    }

    #[test]
    fn test_fifteen_degree_grid() {
        let grid = GridSpec::global(15.0).unwrap();
        assert_eq!(grid.len(), 13 * 25);
    }

    #[test]
    fn test_step_not_dividing_span_stops_inside_bounds() {
        let grid = GridSpec::builder()
            .step(40.0)
            .lat_min(-60.0)
            .lat_max(60.0)
            .build()
            .unwrap();
        let coordinates = grid.coordinates();
        assert_eq!(grid.latitude_count(), 4);
        assert!(coordinates.iter().all(|c| c.0 <= 60.0 && c.1 <= 180.0));
    }

    #[test]
    fn test_single_point_grid() {
        let grid = GridSpec::builder()
            .lat_min(10.0)
            .lat_max(10.0)
            .lon_min(20.0)
            .lon_max(20.0)
            .build()
            .unwrap();
        assert_eq!(grid.coordinates(), vec![LatLon(10.0, 20.0)]);
    }

    #[test]
    fn test_rejects_steps_too_fine_to_enumerate() {
        for step in [1e-9, 5e-324, 0.1] {
            assert!(matches!(
                GridSpec::global(step),
                Err(WeatherGlobeError::InvalidGrid(message)) if message.contains("limit")
            ));
        }
        // 0.5° over the whole globe is 361 x 721 points, under the limit.
        assert_eq!(GridSpec::global(0.5).unwrap().len(), 361 * 721);
        // A fine step is fine over a small enough box.
        let regional = GridSpec::builder()
            .step(0.01)
            .lat_min(50.0)
            .lat_max(51.0)
            .lon_min(4.0)
            .lon_max(5.0)
            .build()
            .unwrap();
        assert_eq!(regional.len(), 101 * 101);
    }

    #[test]
    fn test_rejects_invalid_grids() {
        for step in [0.0, -15.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GridSpec::global(step),
                Err(WeatherGlobeError::InvalidGrid(_))
            ));
        }
        assert!(GridSpec::builder().lat_min(-91.0).build().is_err());
        assert!(GridSpec::builder().lon_max(181.0).build().is_err());
        assert!(GridSpec::builder()
            .lat_min(30.0)
            .lat_max(-30.0)
            .build()
            .is_err());
    }
}
