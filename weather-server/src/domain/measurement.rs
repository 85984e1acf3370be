//! Measurement kinds, readings and their plausibility rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a measurement kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown measurement kind: {0}")]
pub struct UnknownKind(pub String);

/// The closed set of atmospheric quantities a collector can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    Wind,
    Temperature,
    Humidity,
    Pressure,
    CloudCover,
    Precipitation,
}

impl MeasurementKind {
    /// Every kind, in a fixed order.
    pub const ALL: [MeasurementKind; 6] = [
        MeasurementKind::Wind,
        MeasurementKind::Temperature,
        MeasurementKind::Humidity,
        MeasurementKind::Pressure,
        MeasurementKind::CloudCover,
        MeasurementKind::Precipitation,
    ];

    /// Canonical upper-case name, as used on the collector API.
    pub fn name(self) -> &'static str {
        match self {
            MeasurementKind::Wind => "WIND",
            MeasurementKind::Temperature => "TEMPERATURE",
            MeasurementKind::Humidity => "HUMIDITY",
            MeasurementKind::Pressure => "PRESSURE",
            MeasurementKind::CloudCover => "CLOUD_COVER",
            MeasurementKind::Precipitation => "PRECIPITATION",
        }
    }

    /// Range a reading's mean must fall in to be accepted for this kind.
    pub fn accept_range(self) -> AcceptRange {
        match self {
            MeasurementKind::Wind => AcceptRange::at_least(0.0),
            MeasurementKind::Temperature => AcceptRange::between(-50.0, 100.0),
            MeasurementKind::Humidity => AcceptRange::between(0.0, 100.0),
            MeasurementKind::Pressure => AcceptRange::between(650.0, 800.0),
            MeasurementKind::CloudCover => AcceptRange::between(0.0, 100.0),
            MeasurementKind::Precipitation => AcceptRange::between(0.0, 100.0),
        }
    }

    /// Whether `reading` is physically plausible for this kind.
    pub fn accepts(self, reading: &Reading) -> bool {
        self.accept_range().contains(reading.mean)
    }
}

impl FromStr for MeasurementKind {
    type Err = UnknownKind;

    /// Case-insensitive; `CLOUDCOVER` is accepted as an alias of `CLOUD_COVER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WIND" => Ok(MeasurementKind::Wind),
            "TEMPERATURE" => Ok(MeasurementKind::Temperature),
            "HUMIDITY" => Ok(MeasurementKind::Humidity),
            "PRESSURE" => Ok(MeasurementKind::Pressure),
            "CLOUD_COVER" | "CLOUDCOVER" => Ok(MeasurementKind::CloudCover),
            "PRECIPITATION" => Ok(MeasurementKind::Precipitation),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Half-open acceptance interval `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl AcceptRange {
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self { min, max: None }
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.is_none_or(|max| value < max)
    }
}

/// A single summarised measurement pushed by a collector.
///
/// Only `mean` takes part in validation; the distribution fields are
/// stored and returned as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub mean: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub std_dev: f64,
    #[serde(default)]
    pub count: u64,
}

impl Reading {
    /// A reading carrying only a mean.
    pub fn with_mean(mean: f64) -> Self {
        Self {
            mean,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_names() {
        for kind in MeasurementKind::ALL {
            assert_eq!(kind.name().parse::<MeasurementKind>().unwrap(), kind);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "wind".parse::<MeasurementKind>().unwrap(),
            MeasurementKind::Wind
        );
        assert_eq!(
            "Temperature".parse::<MeasurementKind>().unwrap(),
            MeasurementKind::Temperature
        );
        assert_eq!(
            "cloudcover".parse::<MeasurementKind>().unwrap(),
            MeasurementKind::CloudCover
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "LIGHTNING".parse::<MeasurementKind>().unwrap_err();
        assert_eq!(err, UnknownKind("LIGHTNING".to_string()));
        assert_eq!(err.to_string(), "unknown measurement kind: LIGHTNING");
        assert!("".parse::<MeasurementKind>().is_err());
    }

    #[test]
    fn wind_has_no_upper_bound() {
        let wind = MeasurementKind::Wind;
        assert!(wind.accepts(&Reading::with_mean(0.0)));
        assert!(wind.accepts(&Reading::with_mean(1.0e9)));
        assert!(!wind.accepts(&Reading::with_mean(-1.0)));
    }

    #[test]
    fn bounds_are_inclusive_below_exclusive_above() {
        let cases = [
            (MeasurementKind::Temperature, -50.0, 100.0),
            (MeasurementKind::Humidity, 0.0, 100.0),
            (MeasurementKind::Pressure, 650.0, 800.0),
            (MeasurementKind::CloudCover, 0.0, 100.0),
            (MeasurementKind::Precipitation, 0.0, 100.0),
        ];

        for (kind, min, max) in cases {
            assert!(kind.accepts(&Reading::with_mean(min)), "{kind} min");
            assert!(!kind.accepts(&Reading::with_mean(max)), "{kind} max");
            assert!(
                !kind.accepts(&Reading::with_mean(min - 0.001)),
                "{kind} below"
            );
            assert!(
                kind.accepts(&Reading::with_mean(max - 0.001)),
                "{kind} just under"
            );
        }
    }

    #[test]
    fn nan_is_never_accepted() {
        for kind in MeasurementKind::ALL {
            assert!(!kind.accepts(&Reading::with_mean(f64::NAN)));
        }
    }

    #[test]
    fn reading_json_uses_camel_case() {
        let reading = Reading {
            mean: 22.0,
            min: 10.0,
            max: 30.0,
            std_dev: 2.5,
            count: 20,
        };
        let json = serde_json::to_value(reading).unwrap();
        assert_eq!(json["stdDev"], 2.5);
        assert_eq!(json["count"], 20);
    }

    #[test]
    fn reading_distribution_fields_are_optional() {
        let reading: Reading = serde_json::from_str(r#"{"mean": 4.5}"#).unwrap();
        assert_eq!(reading, Reading::with_mean(4.5));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Acceptance agrees with the half-open interval for every kind
        #[test]
        fn accepts_matches_range(mean in -1000.0f64..2000.0) {
            for kind in MeasurementKind::ALL {
                let range = kind.accept_range();
                let expected = mean >= range.min && range.max.is_none_or(|m| mean < m);
                prop_assert_eq!(kind.accepts(&Reading::with_mean(mean)), expected);
            }
        }
    }
}
