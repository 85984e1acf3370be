//! Registered airports.

use serde::Serialize;

use super::coordinate::Coordinate;
use super::iata::Iata;

/// An airport known to the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Airport {
    pub iata: Iata,
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl Airport {
    pub fn new(iata: Iata, coordinate: Coordinate) -> Self {
        Self { iata, coordinate }
    }

    /// Great-circle distance to another airport in kilometres.
    pub fn distance_km(&self, other: &Airport) -> f64 {
        self.coordinate.distance_km(&other.coordinate)
    }
}
