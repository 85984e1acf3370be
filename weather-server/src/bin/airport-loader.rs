//! Registers every airport in an OpenFlights-style data file with a running
//! weather server.
//!
//! Usage: `airport-loader <airports.dat>`; set `AIRPORT_LOADER_URL` to point
//! at a collector other than `http://localhost:9090/collect`.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use weather_server::loader::{LoaderClient, LoaderConfig, read_airports_file};
use weather_server::logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialise logging: {e}");
    }

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: airport-loader <airports.dat>");
        return ExitCode::FAILURE;
    };

    let rows = match read_airports_file(&path) {
        Ok(rows) => rows,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read airport file");
            return ExitCode::FAILURE;
        }
    };
    info!(airports = rows.len(), path = %path.display(), "Loaded airport file");

    let mut config = LoaderConfig::default();
    if let Ok(url) = std::env::var("AIRPORT_LOADER_URL") {
        config = config.with_base_url(url);
    }

    let client = match LoaderClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let summary = client.upload_all(&rows).await;
    if summary.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
