//! Web layer for the weather service.
//!
//! Provides the collector endpoints (`/collect`) used by weather stations and
//! the airport loader, and the query endpoints (`/query`) used by clients.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
