//! Parsing of airport data files.
//!
//! Input follows the OpenFlights `airports.dat` layout: comma separated,
//! quoted text fields, no header. Only the IATA code (column 4), latitude
//! (column 6) and longitude (column 7) are used.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::domain::Iata;

use super::error::LoaderError;

const IATA_COLUMN: usize = 4;
const LATITUDE_COLUMN: usize = 6;
const LONGITUDE_COLUMN: usize = 7;

/// One airport to register.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirportRow {
    pub iata: Iata,
    pub latitude: f64,
    pub longitude: f64,
}

/// Read and parse an airport file.
///
/// Fails with [`LoaderError::EmptyInput`] if the file is missing or empty.
pub fn read_airports_file(path: &Path) -> Result<Vec<AirportRow>, LoaderError> {
    let empty = || LoaderError::EmptyInput {
        path: path.display().to_string(),
    };

    let metadata = std::fs::metadata(path).map_err(|_| empty())?;
    if !metadata.is_file() || metadata.len() == 0 {
        return Err(empty());
    }

    parse_airports(File::open(path)?)
}

/// Parse airport rows from CSV.
///
/// Rows without a usable IATA code (blank, `\N`, not three letters) are
/// skipped; OpenFlights lists many airfields that have none. Rows that are
/// too short or carry unparsable coordinates are errors.
pub fn parse_airports<R: Read>(input: R) -> Result<Vec<AirportRow>, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();

    loop {
        let more = reader.read_record(&mut record).map_err(|e| LoaderError::Parse {
            line: e.position().map_or(0, |p| p.line()),
            message: e.to_string(),
        })?;
        if !more {
            break;
        }

        let line = record.position().map_or(0, |p| p.line());
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        if let Some(row) = parse_record(&record, line)? {
            rows.push(row);
        }
    }

    Ok(rows)
}

fn parse_record(record: &StringRecord, line: u64) -> Result<Option<AirportRow>, LoaderError> {
    let field = |index: usize| {
        record.get(index).ok_or_else(|| LoaderError::Parse {
            line,
            message: format!(
                "expected at least {} columns, found {}",
                LONGITUDE_COLUMN + 1,
                record.len()
            ),
        })
    };

    let raw_iata = field(IATA_COLUMN)?;
    let Ok(iata) = Iata::parse_normalized(raw_iata) else {
        debug!(line, iata = raw_iata, "Skipping row without IATA code");
        return Ok(None);
    };

    let latitude = parse_coordinate(field(LATITUDE_COLUMN)?, "latitude", line)?;
    let longitude = parse_coordinate(field(LONGITUDE_COLUMN)?, "longitude", line)?;

    Ok(Some(AirportRow {
        iata,
        latitude,
        longitude,
    }))
}

fn parse_coordinate(raw: &str, what: &str, line: u64) -> Result<f64, LoaderError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LoaderError::Parse {
            line,
            message: format!("invalid {what}: {raw:?}"),
        }),
    }
}
