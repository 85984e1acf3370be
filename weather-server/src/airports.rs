//! Airport registry.
//!
//! Maps IATA codes to coordinates. Registering an airport for the first time
//! also creates its (empty) atmospheric record, so every registered airport
//! has exactly one record and no record exists without an airport.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::atmosphere::AtmosphereStore;
use crate::domain::{Airport, Coordinate, Iata, WeatherError};

/// Thread-safe registry of known airports.
///
/// Lock order is registry before store: `register` holds the registry
/// write lock while it creates the record.
#[derive(Debug)]
pub struct AirportRegistry {
    airports: RwLock<HashMap<Iata, Airport>>,
    store: Arc<AtmosphereStore>,
}

impl AirportRegistry {
    /// Create an empty registry that creates records in `store`.
    pub fn new(store: Arc<AtmosphereStore>) -> Self {
        Self {
            airports: RwLock::new(HashMap::new()),
            store,
        }
    }

    /// Insert or overwrite the airport for `iata`.
    ///
    /// Re-registering a known code moves it to the new coordinate but keeps
    /// its atmospheric record intact.
    pub fn register(&self, iata: Iata, coordinate: Coordinate) -> Airport {
        let airport = Airport::new(iata, coordinate);

        let mut airports = self.airports.write().unwrap_or_else(PoisonError::into_inner);
        let previous = airports.insert(iata, airport);
        let created = self.store.ensure_record(iata);
        drop(airports);

        match previous {
            Some(old) if old.coordinate != coordinate => info!(
                iata = %iata,
                latitude = coordinate.latitude,
                longitude = coordinate.longitude,
                "Airport moved"
            ),
            Some(_) => {}
            None => info!(
                iata = %iata,
                latitude = coordinate.latitude,
                longitude = coordinate.longitude,
                record_created = created,
                "Airport registered"
            ),
        }

        airport
    }

    /// Look up an airport by code.
    pub fn lookup(&self, iata: &Iata) -> Option<Airport> {
        let airports = self.airports.read().unwrap_or_else(PoisonError::into_inner);
        airports.get(iata).copied()
    }

    /// All registered codes, sorted.
    pub fn codes(&self) -> BTreeSet<Iata> {
        let airports = self.airports.read().unwrap_or_else(PoisonError::into_inner);
        airports.keys().copied().collect()
    }

    /// Codes of every airport within `radius_km` of `origin` (inclusive), sorted.
    pub fn within_radius(&self, origin: &Coordinate, radius_km: f64) -> Vec<Iata> {
        let airports = self.airports.read().unwrap_or_else(PoisonError::into_inner);
        let mut codes: Vec<Iata> = airports
            .values()
            .filter(|a| origin.distance_km(&a.coordinate) <= radius_km)
            .map(|a| a.iata)
            .collect();
        codes.sort();
        codes
    }

    /// Removing airports is not supported.
    pub fn unregister(&self, _iata: &Iata) -> Result<(), WeatherError> {
        Err(WeatherError::NotImplemented("airport removal"))
    }

    /// Number of registered airports.
    pub fn len(&self) -> usize {
        self.airports
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no airports are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
