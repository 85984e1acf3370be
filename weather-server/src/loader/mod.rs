//! Bulk airport loader.
//!
//! Reads an airport data file and registers every airport with a running
//! weather server through the collector API.

mod client;
mod error;
mod parse;

pub use client::{LoaderClient, LoaderConfig, UploadSummary};
pub use error::LoaderError;
pub use parse::{AirportRow, parse_airports, read_airports_file};
