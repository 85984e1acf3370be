//! Domain types for the weather service.
//!
//! This module contains the core domain model types: airports, their
//! coordinates, measurement kinds with their plausibility rules, and the
//! per-airport atmospheric record. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod airport;
mod coordinate;
mod error;
mod iata;
mod measurement;
mod record;

pub use airport::Airport;
pub use coordinate::{Coordinate, EARTH_RADIUS_KM, haversine_km};
pub use error::WeatherError;
pub use iata::{Iata, InvalidIata};
pub use measurement::{AcceptRange, MeasurementKind, Reading, UnknownKind};
pub use record::AtmosphericRecord;
