//! The per-refresh global dataset handed to the rendering layer.

use crate::types::coordinate::{CoordinateKey, LatLon};
use crate::types::observation::WeatherObservation;
use bon::bon;
use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;
use rstar::RTree;

/// One refresh cycle's worth of observations, one per grid coordinate, in grid order.
///
/// Points whose fetch failed are present as zero-valued placeholders, so the length
/// always equals the grid size. [`GlobalDataset::placeholder_count`] tells how many
/// were substituted.
///
/// The dataset also keeps an R-tree over its observations so a renderer can look up
/// the observation under a cursor with [`GlobalDataset::nearest`].
#[derive(Debug, Clone)]
pub struct GlobalDataset {
    observations: Vec<WeatherObservation>,
    index: RTree<WeatherObservation>,
    placeholder_count: usize,
}

#[bon]
impl GlobalDataset {
    /// Wraps observations produced without any failures.
    pub fn from_observations(observations: Vec<WeatherObservation>) -> Self {
        Self::new(observations, 0)
    }

    pub(crate) fn new(observations: Vec<WeatherObservation>, placeholder_count: usize) -> Self {
        let index = RTree::bulk_load(observations.clone());
        Self {
            observations,
            index,
            placeholder_count,
        }
    }

    /// Observations in grid order (latitude-major, then longitude).
    pub fn observations(&self) -> &[WeatherObservation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<WeatherObservation> {
        self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherObservation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// How many observations are placeholders for failed point fetches.
    pub fn placeholder_count(&self) -> usize {
        self.placeholder_count
    }

    /// The observation recorded for exactly this coordinate, if it is a grid point.
    pub fn get(&self, coordinate: LatLon) -> Option<&WeatherObservation> {
        let key = CoordinateKey::from(coordinate);
        self.observations.iter().find(|o| o.coordinate().key() == key)
    }

    /// Finds the observations closest to a location, nearest first.
    ///
    /// Candidates come from the R-tree in degree space and are then re-ranked by
    /// great-circle distance.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** The point to search around.
    /// * `.max_distance_km(f64)`: Optional. Search radius. Defaults to `500.0`.
    /// * `.limit(usize)`: Optional. Maximum number of observations returned. Defaults to `1`.
    ///
    /// # Returns
    ///
    /// `(observation, distance_km)` pairs sorted by distance, possibly empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use weather_globe::{GlobalDataset, LatLon, WeatherObservation};
    ///
    /// let dataset = GlobalDataset::from_observations(vec![
    ///     WeatherObservation::placeholder(LatLon(0.0, 0.0), 0),
    ///     WeatherObservation::placeholder(LatLon(0.0, 30.0), 0),
    /// ]);
    ///
    /// let hits = dataset.nearest().location(LatLon(1.0, 28.0)).call();
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(hits[0].0.coordinate(), LatLon(0.0, 30.0));
    /// ```
    #[builder]
    pub fn nearest(
        &self,
        location: LatLon,
        max_distance_km: Option<f64>,
        limit: Option<usize>,
    ) -> Vec<(WeatherObservation, f64)> {
        let max_distance_km = max_distance_km.unwrap_or(500.0);
        let limit = limit.unwrap_or(1);
        if limit == 0 {
            return vec![];
        }

        // Degree-space ranking drifts from great-circle ranking away from the
        // equator, so look at a few more candidates than requested.
        let candidate_limit = (limit * 4).max(16);
        let mut hits: Vec<(WeatherObservation, f64)> = self
            .index
            .nearest_neighbor_iter(&[location.0, location.1])
            .take(candidate_limit)
            .filter_map(|observation| {
                let dist_km = distance(
                    HaversineLocation {
                        latitude: location.0,
                        longitude: location.1,
                    },
                    HaversineLocation {
                        latitude: observation.latitude,
                        longitude: observation.longitude,
                    },
                    Units::Kilometers,
                );
                (dist_km <= max_distance_km).then_some((*observation, dist_km))
            })
            .collect();

        hits.sort_by_key(|(_, dist_km)| OrderedFloat(*dist_km));
        hits.truncate(limit);
        hits
    }
}

impl<'a> IntoIterator for &'a GlobalDataset {
    type Item = &'a WeatherObservation;
    type IntoIter = std::slice::Iter<'a, WeatherObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
