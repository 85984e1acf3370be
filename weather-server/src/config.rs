//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use crate::query::StatsConfig;

/// Default listen address, matching the port collectors have always used.
pub const DEFAULT_LISTEN_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 9090);

/// Configuration for the weather server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub listen_addr: SocketAddr,

    /// Register the built-in demo airports at startup.
    pub seed_demo_airports: bool,

    /// Health statistics settings.
    pub stats: StatsConfig,
}

impl ServerConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// - `WEATHER_LISTEN_ADDR`: socket address, e.g. `0.0.0.0:9090`
    /// - `WEATHER_SEED_DEMO`: `1`/`true` to register the demo airports
    /// - `WEATHER_FRESHNESS_SECS`: freshness window for active records
    ///
    /// Unparsable values are reported as warnings and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("WEATHER_LISTEN_ADDR") {
            match raw.parse() {
                Ok(addr) => config.listen_addr = addr,
                Err(e) => tracing::warn!(value = %raw, error = %e, "Ignoring WEATHER_LISTEN_ADDR"),
            }
        }

        if let Some(raw) = lookup("WEATHER_SEED_DEMO") {
            config.seed_demo_airports = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(raw) = lookup("WEATHER_FRESHNESS_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => {
                    config.stats = config
                        .stats
                        .with_freshness_window(Duration::from_secs(secs))
                }
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "Ignoring WEATHER_FRESHNESS_SECS")
                }
            }
        }

        config
    }

    /// Set a custom listen address.
    pub fn with_listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    /// Enable or disable demo airport seeding.
    pub fn with_demo_airports(mut self, seed: bool) -> Self {
        self.seed_demo_airports = seed;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(DEFAULT_LISTEN_ADDR),
            seed_demo_airports: false,
            stats: StatsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
        assert!(!config.seed_demo_airports);
        assert_eq!(config.stats.freshness_window, Duration::from_secs(86_400));
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.listen_addr, ServerConfig::default().listen_addr);
        assert!(!config.seed_demo_airports);
    }

    #[test]
    fn reads_environment() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("WEATHER_LISTEN_ADDR", "0.0.0.0:8080"),
            ("WEATHER_SEED_DEMO", "true"),
            ("WEATHER_FRESHNESS_SECS", "3600"),
        ]));
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert!(config.seed_demo_airports);
        assert_eq!(config.stats.freshness_window, Duration::from_secs(3600));
    }

    #[test]
    fn bad_values_are_ignored() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("WEATHER_LISTEN_ADDR", "not-an-address"),
            ("WEATHER_FRESHNESS_SECS", "-5"),
        ]));
        assert_eq!(config.listen_addr, ServerConfig::default().listen_addr);
        assert_eq!(config.stats.freshness_window, Duration::from_secs(86_400));
    }

    #[test]
    fn builders() {
        let addr: SocketAddr = "127.0.0.1:1234".parse().unwrap();
        let config = ServerConfig::default()
            .with_listen_addr(addr)
            .with_demo_airports(true);
        assert_eq!(config.listen_addr, addr);
        assert!(config.seed_demo_airports);
    }
}
