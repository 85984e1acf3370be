//! Domain error types.
//!
//! These are the recoverable conditions the weather core reports to its
//! callers. Readings that fail range validation are not errors: they are
//! dropped without a trace in the record.

use super::Iata;

/// Errors returned by the weather core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    /// The operation referenced an airport that was never registered
    #[error("no such airport: {0}")]
    NoSuchAirport(Iata),

    /// A reading named a kind outside the closed set
    #[error("unknown measurement kind: {0}")]
    UnknownMeasurementKind(String),

    /// The operation exists on the interface but is not supported
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}
