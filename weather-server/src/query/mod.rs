//! Radius weather queries and usage statistics.
//!
//! `WeatherService` ties the airport registry, the atmosphere store and the
//! frequency counters together. Every query is counted, and the counters
//! feed the health snapshot together with record freshness.

mod service;
mod stats;

pub use service::{DEMO_AIRPORTS, WeatherService};
pub use stats::{FrequencyCounters, HealthStats, StatsConfig};
