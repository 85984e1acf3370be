//! The weather service: registry, store and counters behind one handle.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::airports::AirportRegistry;
use crate::atmosphere::{AtmosphereStore, SubmitOutcome};
use crate::domain::{Airport, AtmosphericRecord, Coordinate, Iata, Reading, WeatherError};

use super::stats::{FrequencyCounters, HealthStats, StatsConfig};

/// Airports registered when demo seeding is enabled.
pub const DEMO_AIRPORTS: [(&str, f64, f64); 5] = [
    ("BOS", 42.364347, -71.005181),
    ("EWR", 40.6925, -74.168667),
    ("JFK", 40.639751, -73.778925),
    ("LGA", 40.777245, -73.872608),
    ("MMU", 40.79935, -74.4148747),
];

/// Entry point for collectors and clients.
///
/// Construct one per process and share it behind an `Arc`; tests build
/// their own isolated instances. Lock order is registry, then store, then
/// counters.
#[derive(Debug)]
pub struct WeatherService {
    store: Arc<AtmosphereStore>,
    registry: AirportRegistry,
    counters: Mutex<FrequencyCounters>,
    config: StatsConfig,
}

impl WeatherService {
    /// Create an empty service.
    pub fn new(config: StatsConfig) -> Self {
        let store = Arc::new(AtmosphereStore::new());
        Self {
            registry: AirportRegistry::new(store.clone()),
            store,
            counters: Mutex::new(FrequencyCounters::new()),
            config,
        }
    }

    /// Register the fixed demo airports around New York and Boston.
    pub fn seed_demo_airports(&self) {
        for (code, latitude, longitude) in DEMO_AIRPORTS {
            if let Ok(iata) = Iata::parse(code) {
                self.register_airport(iata, latitude, longitude);
            }
        }
    }

    /// Accept a reading from a collector, stamped with the current time.
    pub fn submit_reading(
        &self,
        iata: &Iata,
        kind_name: &str,
        reading: Reading,
    ) -> Result<SubmitOutcome, WeatherError> {
        self.submit_reading_at(iata, kind_name, reading, Utc::now())
    }

    /// Accept a reading from a collector, stamped at `now`.
    pub fn submit_reading_at(
        &self,
        iata: &Iata,
        kind_name: &str,
        reading: Reading,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, WeatherError> {
        self.store.submit_named_at(iata, kind_name, reading, now)
    }

    /// Register or move an airport.
    pub fn register_airport(&self, iata: Iata, latitude: f64, longitude: f64) -> Airport {
        self.registry
            .register(iata, Coordinate::new(latitude, longitude))
    }

    /// Every registered code.
    pub fn list_airports(&self) -> BTreeSet<Iata> {
        self.registry.codes()
    }

    /// A registered airport, if known.
    pub fn get_airport(&self, iata: &Iata) -> Option<Airport> {
        self.registry.lookup(iata)
    }

    /// Removing airports is not supported.
    pub fn remove_airport(&self, iata: &Iata) -> Result<(), WeatherError> {
        self.registry.unregister(iata)
    }

    /// Weather at `iata`, or at every airport within `radius_km` of it.
    ///
    /// With no radius (or zero) the airport's own record is returned as-is,
    /// even when empty. With a radius, only records holding at least one
    /// reading are returned, ordered by airport code. The query is counted
    /// before anything else, so failed queries show up in the statistics.
    pub fn query_weather(
        &self,
        iata: &Iata,
        radius_km: Option<f64>,
    ) -> Result<Vec<AtmosphericRecord>, WeatherError> {
        let radius_km = radius_km.unwrap_or(0.0);
        self.record_query(iata, radius_km);

        if radius_km == 0.0 {
            let record = self
                .store
                .get(iata)
                .ok_or(WeatherError::NoSuchAirport(*iata))?;
            return Ok(vec![record]);
        }

        let origin = self
            .registry
            .lookup(iata)
            .ok_or(WeatherError::NoSuchAirport(*iata))?;

        let nearby = self.registry.within_radius(&origin.coordinate, radius_km);
        let records: Vec<AtmosphericRecord> = self
            .store
            .get_many(&nearby)
            .into_iter()
            .filter(AtmosphericRecord::is_populated)
            .collect();

        debug!(
            iata = %iata,
            radius_km,
            in_range = nearby.len(),
            returned = records.len(),
            "Radius query"
        );

        Ok(records)
    }

    /// Count a query against its airport and exact radius.
    ///
    /// Unregistered codes are all counted under a single shared key.
    pub fn record_query(&self, iata: &Iata, radius_km: f64) {
        let airport = self.registry.lookup(iata).map(|a| a.iata);
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.record(airport, radius_km);
    }

    /// Health snapshot as of now.
    pub fn health_stats(&self) -> HealthStats {
        self.health_stats_at(Utc::now())
    }

    /// Health snapshot as of `now`.
    pub fn health_stats_at(&self, now: DateTime<Utc>) -> HealthStats {
        let codes = self.registry.codes();
        let cutoff = chrono::Duration::from_std(self.config.freshness_window)
            .ok()
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let active_record_count = self.store.count_active_since(cutoff);

        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        HealthStats {
            active_record_count,
            per_airport_frequency_fraction: counters.airport_fractions(codes),
            radius_histogram: counters.radius_histogram(self.config.histogram_buckets),
        }
    }

    /// The stats configuration in use.
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new(StatsConfig::default())
    }
}
