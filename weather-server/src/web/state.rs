//! Application state for the web layer.

use std::sync::Arc;

use crate::query::WeatherService;

/// Shared application state.
///
/// Contains the weather service every handler works against.
#[derive(Clone)]
pub struct AppState {
    /// Registry, atmosphere store and query counters
    pub weather: Arc<WeatherService>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(weather: WeatherService) -> Self {
        Self {
            weather: Arc::new(weather),
        }
    }

    /// Create an app state around an already shared service.
    pub fn from_shared(weather: Arc<WeatherService>) -> Self {
        Self { weather }
    }
}
