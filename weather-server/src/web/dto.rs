//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::Iata;
use crate::query::HealthStats;

/// Health snapshot as reported on the query ping endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Populated records updated inside the freshness window
    pub datasize: usize,

    /// Query fraction per registered airport
    pub iata_freq: BTreeMap<Iata, f64>,

    /// Radius query histogram
    pub radius_freq: Vec<u64>,
}

impl From<HealthStats> for HealthResponse {
    fn from(stats: HealthStats) -> Self {
        Self {
            datasize: stats.active_record_count,
            iata_freq: stats.per_airport_frequency_fraction,
            radius_freq: stats.radius_histogram,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
