//! Airport weather aggregation server.
//!
//! Weather collection stations push atmospheric readings per airport;
//! clients ask for the current conditions at an airport and at every
//! airport within a radius of it.

pub mod airports;
pub mod atmosphere;
pub mod config;
pub mod domain;
pub mod loader;
pub mod logging;
pub mod query;
pub mod web;
