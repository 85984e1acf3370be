//! In-memory store of per-airport atmospheric records.
//!
//! Records are created by the airport registry when an airport is first
//! registered and are never removed. Collectors update them one reading
//! at a time; each reading is checked against the plausibility rule for its
//! kind and silently dropped when it fails.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{AtmosphericRecord, Iata, MeasurementKind, Reading, WeatherError};

/// Outcome of submitting a reading to a known airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The reading passed validation and replaced the previous value.
    Accepted,
    /// The reading was out of range; the record is unchanged.
    Dropped,
}

/// Thread-safe map from airport code to its atmospheric record.
#[derive(Debug, Default)]
pub struct AtmosphereStore {
    records: RwLock<HashMap<Iata, AtmosphericRecord>>,
}

impl AtmosphereStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record for `iata` unless one already exists.
    ///
    /// Returns `true` if a record was created.
    pub(crate) fn ensure_record(&self, iata: Iata) -> bool {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        if records.contains_key(&iata) {
            return false;
        }
        records.insert(iata, AtmosphericRecord::new());
        true
    }

    /// A snapshot of the record for `iata`.
    pub fn get(&self, iata: &Iata) -> Option<AtmosphericRecord> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.get(iata).cloned()
    }

    /// Snapshots of the records for `codes`, in the given order.
    ///
    /// Codes without a record are skipped.
    pub fn get_many(&self, codes: &[Iata]) -> Vec<AtmosphericRecord> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        codes
            .iter()
            .filter_map(|code| records.get(code).cloned())
            .collect()
    }

    /// Submit a reading whose kind is given by name.
    ///
    /// The kind is resolved before the airport is looked up, so an unknown
    /// kind is reported even for an unknown airport.
    pub fn submit_named_at(
        &self,
        iata: &Iata,
        kind_name: &str,
        reading: Reading,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, WeatherError> {
        let kind: MeasurementKind = kind_name
            .parse()
            .map_err(|_| WeatherError::UnknownMeasurementKind(kind_name.to_string()))?;
        self.submit_at(iata, kind, reading, now)
    }

    /// Submit a reading of `kind` for `iata`, stamped at `now`.
    pub fn submit_at(
        &self,
        iata: &Iata,
        kind: MeasurementKind,
        reading: Reading,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, WeatherError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let record = records
            .get_mut(iata)
            .ok_or(WeatherError::NoSuchAirport(*iata))?;

        if record.apply(kind, reading, now) {
            debug!(iata = %iata, kind = %kind, mean = reading.mean, "Reading accepted");
            Ok(SubmitOutcome::Accepted)
        } else {
            debug!(iata = %iata, kind = %kind, mean = reading.mean, "Reading out of range, dropped");
            Ok(SubmitOutcome::Dropped)
        }
    }

    /// Count records holding at least one reading that were updated after `cutoff`.
    pub fn count_active_since(&self, cutoff: DateTime<Utc>) -> usize {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records
            .values()
            .filter(|r| r.is_populated() && r.updated_since(cutoff))
            .count()
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn iata(s: &str) -> Iata {
        Iata::parse(s).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn store_with(codes: &[&str]) -> AtmosphereStore {
        let store = AtmosphereStore::new();
        for code in codes {
            store.ensure_record(iata(code));
        }
        store
    }

    #[test]
    fn ensure_record_is_idempotent() {
        let store = AtmosphereStore::new();
        assert!(store.ensure_record(iata("BOS")));
        store
            .submit_at(&iata("BOS"), MeasurementKind::Wind, Reading::with_mean(3.0), at(0))
            .unwrap();

        assert!(!store.ensure_record(iata("BOS")));
        assert!(store.get(&iata("BOS")).unwrap().wind.is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn submit_to_unknown_airport() {
        let store = store_with(&["BOS"]);
        let err = store
            .submit_at(&iata("JFK"), MeasurementKind::Wind, Reading::with_mean(3.0), at(0))
            .unwrap_err();
        assert_eq!(err, WeatherError::NoSuchAirport(iata("JFK")));
    }

    #[test]
    fn unknown_kind_leaves_records_unchanged() {
        let store = store_with(&["BOS", "JFK"]);
        let before: Vec<_> = ["BOS", "JFK"]
            .iter()
            .map(|c| store.get(&iata(c)).unwrap())
            .collect();

        let err = store
            .submit_named_at(&iata("BOS"), "LIGHTNING", Reading::with_mean(1.0), at(0))
            .unwrap_err();
        assert_eq!(err, WeatherError::UnknownMeasurementKind("LIGHTNING".into()));

        let after: Vec<_> = ["BOS", "JFK"]
            .iter()
            .map(|c| store.get(&iata(c)).unwrap())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn unknown_kind_wins_over_unknown_airport() {
        let store = AtmosphereStore::new();
        let err = store
            .submit_named_at(&iata("BOS"), "LIGHTNING", Reading::with_mean(1.0), at(0))
            .unwrap_err();
        assert!(matches!(err, WeatherError::UnknownMeasurementKind(_)));
    }

    #[test]
    fn out_of_range_reading_is_dropped_silently() {
        let store = store_with(&["BOS"]);
        let outcome = store
            .submit_named_at(&iata("BOS"), "wind", Reading::with_mean(-1.0), at(0))
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Dropped);
        let record = store.get(&iata("BOS")).unwrap();
        assert_eq!(record, AtmosphericRecord::new());
        assert_eq!(record.last_update_time(), None);
    }

    #[test]
    fn accepted_reading_is_visible() {
        let store = store_with(&["BOS"]);
        let outcome = store
            .submit_named_at(&iata("BOS"), "TEMPERATURE", Reading::with_mean(15.0), at(0))
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Accepted);
        let record = store.get(&iata("BOS")).unwrap();
        assert_eq!(record.temperature.unwrap().mean, 15.0);
        assert_eq!(record.last_update_time(), Some(at(0)));
    }

    #[test]
    fn get_many_preserves_order_and_skips_missing() {
        let store = store_with(&["BOS", "JFK"]);
        store
            .submit_at(&iata("JFK"), MeasurementKind::Wind, Reading::with_mean(9.0), at(0))
            .unwrap();

        let records = store.get_many(&[iata("JFK"), iata("XXX"), iata("BOS")]);
        assert_eq!(records.len(), 2);
        assert!(records[0].wind.is_some());
        assert!(records[1].wind.is_none());
    }

    #[test]
    fn active_count_needs_data_and_freshness() {
        let store = store_with(&["BOS", "JFK", "LGA"]);
        store
            .submit_at(&iata("BOS"), MeasurementKind::Wind, Reading::with_mean(1.0), at(0))
            .unwrap();
        store
            .submit_at(
                &iata("JFK"),
                MeasurementKind::Wind,
                Reading::with_mean(1.0),
                at(0) - Duration::days(2),
            )
            .unwrap();

        assert_eq!(store.count_active_since(at(0) - Duration::days(1)), 1);
        assert_eq!(store.count_active_since(at(0) - Duration::days(3)), 2);
    }
}
