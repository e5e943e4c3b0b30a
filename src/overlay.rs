//! Turns a [`GlobalDataset`] into renderer-ready markers for one [`DisplayMode`].

use crate::color::{
    precipitation_to_color, temperature_to_color, wind_particle_color, Rgb,
};
use crate::geo::project;
use crate::types::coordinate::LatLon;
use crate::types::dataset::GlobalDataset;
use crate::types::display_mode::DisplayMode;
use crate::types::observation::WeatherObservation;
use serde::Serialize;

const TEMPERATURE_POINT_SIZE: f64 = 0.5;
const TEMPERATURE_POINT_ALTITUDE: f64 = 0.1;
const COMPOSITE_RAIN_ALTITUDE: f64 = 0.15;

/// A colored point drawn on the globe surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointMarker {
    pub coordinate: LatLon,
    /// Surface position on a globe of the overlay's radius.
    pub position: [f64; 3],
    /// Point radius, in globe units.
    pub size: f64,
    /// Height above the surface, as a fraction of the globe radius.
    pub altitude: f64,
    pub color: Rgb,
}

/// A wind particle drawn at a grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindParticle {
    pub coordinate: LatLon,
    pub position: [f64; 3],
    /// Wind speed in km/h.
    pub speed: f64,
    /// Wind direction in degrees.
    pub direction: f64,
    /// Particle size in pixels, between 2 and 10.
    pub size: f64,
    pub color: Rgb,
}

/// Everything a renderer draws for one dataset in one display mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overlay {
    pub points: Vec<PointMarker>,
    pub particles: Vec<WindParticle>,
}

impl Overlay {
    /// Builds the overlay for `mode`.
    ///
    /// | mode            | points                                             | particles |
    /// |-----------------|----------------------------------------------------|-----------|
    /// | `Temperature`   | one per observation                                | none      |
    /// | `Precipitation` | one per observation, scaled by precipitation       | none      |
    /// | `Wind`          | none                                               | one per observation |
    /// | `Composite`     | temperature points, then rain points where `p > 0` | one per observation |
    ///
    /// ```
    /// use weather_globe::{DisplayMode, GlobalDataset, LatLon, Overlay, WeatherObservation};
    ///
    /// let dataset = GlobalDataset::from_observations(vec![
    ///     WeatherObservation::placeholder(LatLon(0.0, 0.0), 0),
    ///     WeatherObservation::placeholder(LatLon(0.0, 30.0), 0),
    /// ]);
    /// let overlay = Overlay::build(&dataset, DisplayMode::Wind, 100.0);
    /// assert!(overlay.points.is_empty());
    /// assert_eq!(overlay.particles.len(), 2);
    /// ```
    pub fn build(dataset: &GlobalDataset, mode: DisplayMode, globe_radius: f64) -> Self {
        let observations = dataset.observations();
        match mode {
            DisplayMode::Temperature => Self {
                points: temperature_points(observations, globe_radius),
                particles: vec![],
            },
            DisplayMode::Precipitation => Self {
                points: observations
                    .iter()
                    .map(|o| {
                        let p = o.precipitation;
                        marker(
                            o,
                            globe_radius,
                            (p / 10.0).max(0.5),
                            (p / 50.0).max(0.1),
                            precipitation_to_color(p),
                        )
                    })
                    .collect(),
                particles: vec![],
            },
            DisplayMode::Wind => Self {
                points: vec![],
                particles: wind_particles(observations, globe_radius),
            },
            DisplayMode::Composite => {
                let mut points = temperature_points(observations, globe_radius);
                points.extend(observations.iter().filter(|o| o.precipitation > 0.0).map(
                    |o| {
                        let p = o.precipitation;
                        marker(
                            o,
                            globe_radius,
                            (p / 15.0).max(0.3),
                            COMPOSITE_RAIN_ALTITUDE,
                            precipitation_to_color(p),
                        )
                    },
                ));
                Self {
                    points,
                    particles: wind_particles(observations, globe_radius),
                }
            }
        }
    }
}

fn marker(
    observation: &WeatherObservation,
    globe_radius: f64,
    size: f64,
    altitude: f64,
    color: Rgb,
) -> PointMarker {
    PointMarker {
        coordinate: observation.coordinate(),
        position: project(observation.latitude, observation.longitude, globe_radius),
        size,
        altitude,
        color,
    }
}

fn temperature_points(observations: &[WeatherObservation], globe_radius: f64) -> Vec<PointMarker> {
    observations
        .iter()
        .map(|o| {
            marker(
                o,
                globe_radius,
                TEMPERATURE_POINT_SIZE,
                TEMPERATURE_POINT_ALTITUDE,
                temperature_to_color(o.temperature),
            )
        })
        .collect()
}

fn wind_particles(observations: &[WeatherObservation], globe_radius: f64) -> Vec<WindParticle> {
    observations
        .iter()
        .map(|o| WindParticle {
            coordinate: o.coordinate(),
            position: project(o.latitude, o.longitude, globe_radius),
            speed: o.wind_speed,
            direction: o.wind_direction,
            size: (o.wind_speed.max(0.0) / 5.0).clamp(2.0, 10.0),
            color: wind_particle_color(o.wind_speed),
        })
        .collect()
}
