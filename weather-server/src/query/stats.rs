//! Query frequency counters and the health snapshot built from them.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde::Serialize;

use crate::domain::Iata;

/// Default freshness window for counting a record as active: 24 hours.
const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Default number of radius histogram buckets.
const DEFAULT_HISTOGRAM_BUCKETS: usize = 10;

/// Configuration for health statistics.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Records last written longer ago than this are not counted as active.
    pub freshness_window: Duration,

    /// Length of the radius histogram; radii are bucketed modulo this.
    pub histogram_buckets: usize,
}

impl StatsConfig {
    /// Set a custom freshness window.
    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }

    /// Set a custom histogram length. Zero is treated as one.
    pub fn with_histogram_buckets(mut self, buckets: usize) -> Self {
        self.histogram_buckets = buckets.max(1);
        self
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            histogram_buckets: DEFAULT_HISTOGRAM_BUCKETS,
        }
    }
}

/// Point-in-time usage and data-freshness summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStats {
    /// Records with at least one reading, written inside the freshness window.
    pub active_record_count: usize,

    /// Per registered airport: query count divided by the number of distinct
    /// airport keys ever counted.
    pub per_airport_frequency_fraction: BTreeMap<Iata, f64>,

    /// Query counts bucketed by truncated radius modulo the histogram length.
    pub radius_histogram: Vec<u64>,
}

/// Process-lifetime query counters.
///
/// Airport queries are keyed by the registered airport they resolved to;
/// queries for unregistered codes all share the `None` key. Radii are keyed
/// by their exact value.
#[derive(Debug, Default)]
pub struct FrequencyCounters {
    by_airport: HashMap<Option<Iata>, u64>,
    by_radius: HashMap<u64, u64>,
}

impl FrequencyCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one query against `airport` and `radius_km`.
    pub fn record(&mut self, airport: Option<Iata>, radius_km: f64) {
        *self.by_airport.entry(airport).or_insert(0) += 1;
        *self.by_radius.entry(radius_key(radius_km)).or_insert(0) += 1;
    }

    /// Queries counted for `airport`.
    pub fn airport_count(&self, airport: Option<Iata>) -> u64 {
        self.by_airport.get(&airport).copied().unwrap_or(0)
    }

    /// Queries counted for exactly `radius_km`.
    pub fn radius_count(&self, radius_km: f64) -> u64 {
        self.by_radius
            .get(&radius_key(radius_km))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct airport keys seen, including the unregistered key.
    pub fn distinct_airport_keys(&self) -> usize {
        self.by_airport.len()
    }

    /// Query fraction for each of `airports`.
    ///
    /// The denominator is the number of distinct airport keys, not the total
    /// number of queries. Before any query every fraction is zero.
    pub fn airport_fractions<I>(&self, airports: I) -> BTreeMap<Iata, f64>
    where
        I: IntoIterator<Item = Iata>,
    {
        let keys = self.distinct_airport_keys();
        airports
            .into_iter()
            .map(|iata| {
                let fraction = if keys == 0 {
                    0.0
                } else {
                    self.airport_count(Some(iata)) as f64 / keys as f64
                };
                (iata, fraction)
            })
            .collect()
    }

    /// Fold radius counts into `buckets` slots by truncated radius.
    ///
    /// Different radii landing in the same slot are summed.
    pub fn radius_histogram(&self, buckets: usize) -> Vec<u64> {
        let buckets = buckets.max(1);
        let mut histogram = vec![0; buckets];
        for (&key, &count) in &self.by_radius {
            let radius = f64::from_bits(key);
            histogram[histogram_slot(radius, buckets)] += count;
        }
        histogram
    }
}

/// Hashable key for an exact radius value; both zeros share a key.
fn radius_key(radius_km: f64) -> u64 {
    if radius_km == 0.0 {
        0.0f64.to_bits()
    } else {
        radius_km.to_bits()
    }
}

fn histogram_slot(radius_km: f64, buckets: usize) -> usize {
    // `as` saturates and maps NaN to zero.
    (radius_km.trunc() as i64).rem_euclid(buckets as i64) as usize
}
