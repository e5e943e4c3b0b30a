//! Spherical coordinate math for placing observations on a globe.
//!
//! The globe frame is y-up: the north pole sits at `+y`, and the
//! `(lat 0, lon 0)` point at `+x`.

use crate::types::coordinate::LatLon;
use haversine::{distance, Location as HaversineLocation, Units};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Projects a coordinate onto a sphere of the given radius.
///
/// With `phi = 90 - latitude` and `theta = longitude + 180` (both in radians):
/// `x = -r sin(phi) cos(theta)`, `y = r cos(phi)`, `z = r sin(phi) sin(theta)`.
///
/// ```
/// use weather_globe::geo::project;
///
/// let [x, y, z] = project(90.0, 0.0, 2.0);
/// assert!(x.abs() < 1e-12 && (y - 2.0).abs() < 1e-12 && z.abs() < 1e-12);
/// ```
pub fn project(latitude: f64, longitude: f64, radius: f64) -> [f64; 3] {
    let phi = (90.0 - latitude).to_radians();
    let theta = (longitude + 180.0).to_radians();
    [
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    ]
}

/// Inverse of [`project`]: recovers the coordinate of a point on (or off) the sphere.
///
/// The radius is taken from the vector length, so any nonzero vector works. The
/// longitude is normalized into `[-180, 180]`. At the poles the longitude is
/// undefined and comes back as whatever `atan2` yields.
///
/// Returns `None` for the zero vector or a vector with non-finite components.
pub fn unproject([x, y, z]: [f64; 3]) -> Option<LatLon> {
    let radius = (x * x + y * y + z * z).sqrt();
    if !radius.is_finite() || radius == 0.0 {
        return None;
    }

    let phi = (y / radius).clamp(-1.0, 1.0).acos();
    let theta = z.atan2(-x);
    let latitude = 90.0 - phi.to_degrees();
    let mut longitude = theta.to_degrees() - 180.0;
    if longitude < -180.0 {
        longitude += 360.0;
    }
    Some(LatLon(latitude, longitude))
}

/// Haversine distance in kilometres between two coordinates.
pub fn great_circle_distance(a: LatLon, b: LatLon) -> f64 {
    distance(
        HaversineLocation {
            latitude: a.0,
            longitude: a.1,
        },
        HaversineLocation {
            latitude: b.0,
            longitude: b.1,
        },
        Units::Kilometers,
    )
}
