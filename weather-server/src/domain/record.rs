//! Per-airport atmospheric state.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::measurement::{MeasurementKind, Reading};

/// The latest accepted reading of each kind for one airport.
///
/// There is no history: a newly accepted reading replaces the previous one
/// of the same kind. `last_update_time` tracks the most recent accepted
/// write across all kinds and never moves backwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtmosphericRecord {
    pub wind: Option<Reading>,
    pub temperature: Option<Reading>,
    pub humidity: Option<Reading>,
    pub pressure: Option<Reading>,
    pub cloud_cover: Option<Reading>,
    pub precipitation: Option<Reading>,
    #[serde(serialize_with = "millis_or_zero")]
    last_update_time: Option<DateTime<Utc>>,
}

impl AtmosphericRecord {
    /// An empty record: no readings, never updated.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current reading for `kind`, if any.
    pub fn get(&self, kind: MeasurementKind) -> Option<&Reading> {
        self.slot(kind).as_ref()
    }

    /// Whether at least one kind currently holds a reading.
    pub fn is_populated(&self) -> bool {
        MeasurementKind::ALL
            .iter()
            .any(|kind| self.get(*kind).is_some())
    }

    /// Time of the most recent accepted reading.
    pub fn last_update_time(&self) -> Option<DateTime<Utc>> {
        self.last_update_time
    }

    /// Whether the record was last written after `cutoff`.
    pub fn updated_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_update_time.is_some_and(|t| t > cutoff)
    }

    /// Validate `reading` against the rule for `kind` and store it if plausible.
    ///
    /// Returns `false` and leaves the record untouched when the reading is
    /// rejected. On acceptance the timestamp advances to `now`, unless it
    /// already holds a later instant.
    pub fn apply(&mut self, kind: MeasurementKind, reading: Reading, now: DateTime<Utc>) -> bool {
        if !kind.accepts(&reading) {
            return false;
        }

        *self.slot_mut(kind) = Some(reading);
        self.last_update_time = Some(match self.last_update_time {
            Some(previous) if previous > now => previous,
            _ => now,
        });
        true
    }

    fn slot(&self, kind: MeasurementKind) -> &Option<Reading> {
        match kind {
            MeasurementKind::Wind => &self.wind,
            MeasurementKind::Temperature => &self.temperature,
            MeasurementKind::Humidity => &self.humidity,
            MeasurementKind::Pressure => &self.pressure,
            MeasurementKind::CloudCover => &self.cloud_cover,
            MeasurementKind::Precipitation => &self.precipitation,
        }
    }

    fn slot_mut(&mut self, kind: MeasurementKind) -> &mut Option<Reading> {
        match kind {
            MeasurementKind::Wind => &mut self.wind,
            MeasurementKind::Temperature => &mut self.temperature,
            MeasurementKind::Humidity => &mut self.humidity,
            MeasurementKind::Pressure => &mut self.pressure,
            MeasurementKind::CloudCover => &mut self.cloud_cover,
            MeasurementKind::Precipitation => &mut self.precipitation,
        }
    }
}

fn millis_or_zero<S: Serializer>(
    time: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(time.map_or(0, |t| t.timestamp_millis()))
}
