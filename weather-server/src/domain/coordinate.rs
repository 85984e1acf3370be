//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// A position on the earth's surface in decimal degrees.
///
/// Ranges are not enforced: out-of-range values are stored as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(self, other)
    }
}

/// Haversine distance between two coordinates, in kilometres.
///
/// # Examples
///
/// ```
/// use weather_server::domain::{Coordinate, haversine_km};
///
/// let bos = Coordinate::new(42.364347, -71.005181);
/// let jfk = Coordinate::new(40.639751, -73.778925);
/// let km = haversine_km(&bos, &jfk);
/// assert!((280.0..320.0).contains(&km));
/// ```
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}
