//! Airport code types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid IATA code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid IATA code: {reason}")]
pub struct InvalidIata {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// IATA codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `Iata` value is valid by construction, so the registry and the
/// atmosphere store can key on it without re-checking.
///
/// # Examples
///
/// ```
/// use weather_server::domain::Iata;
///
/// let bos = Iata::parse("BOS").unwrap();
/// assert_eq!(bos.as_str(), "BOS");
///
/// // Strict parsing rejects lowercase
/// assert!(Iata::parse("bos").is_err());
///
/// // Normalized parsing accepts it, along with quotes
/// assert_eq!(Iata::parse_normalized("\"bos\"").unwrap(), bos);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iata([u8; 3]);

impl Iata {
    /// Parse an IATA code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidIata> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidIata {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidIata {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(Iata([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse an IATA code as it arrives from collectors and data files.
    ///
    /// Surrounding whitespace and double quotes are stripped and the code is
    /// uppercased before strict parsing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidIata> {
        let trimmed = s.trim().trim_matches('"').trim();
        Self::parse(&trimmed.to_ascii_uppercase())
    }

    /// Returns the IATA code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for Iata {
    type Err = InvalidIata;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Iata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iata({})", self.as_str())
    }
}

impl fmt::Display for Iata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Iata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Iata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Iata::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_iata() {
        assert!(Iata::parse("BOS").is_ok());
        assert!(Iata::parse("JFK").is_ok());
        assert!(Iata::parse("AAA").is_ok());
        assert!(Iata::parse("ZZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(Iata::parse("bos").is_err());
        assert!(Iata::parse("Bos").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(Iata::parse("").is_err());
        assert!(Iata::parse("BO").is_err());
        assert!(Iata::parse("BOST").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(Iata::parse("B1S").is_err());
        assert!(Iata::parse("B S").is_err());
        assert!(Iata::parse("BÖS").is_err());
    }

    #[test]
    fn normalized_strips_quotes_and_case() {
        let bos = Iata::parse("BOS").unwrap();
        assert_eq!(Iata::parse_normalized("bos").unwrap(), bos);
        assert_eq!(Iata::parse_normalized("\"BOS\"").unwrap(), bos);
        assert_eq!(Iata::parse_normalized("  jfk ").unwrap().as_str(), "JFK");
        assert!(Iata::parse_normalized("\"\"").is_err());
        assert!(Iata::parse_normalized("\\N").is_err());
    }

    #[test]
    fn display_and_debug() {
        let jfk = Iata::parse("JFK").unwrap();
        assert_eq!(format!("{}", jfk), "JFK");
        assert_eq!(format!("{:?}", jfk), "Iata(JFK)");
    }

    #[test]
    fn ordering_is_alphabetical() {
        let mut codes = vec![
            Iata::parse("LGA").unwrap(),
            Iata::parse("BOS").unwrap(),
            Iata::parse("JFK").unwrap(),
        ];
        codes.sort();
        let names: Vec<_> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["BOS", "JFK", "LGA"]);
    }

    #[test]
    fn serde_as_plain_string() {
        let bos = Iata::parse("BOS").unwrap();
        assert_eq!(serde_json::to_string(&bos).unwrap(), "\"BOS\"");
        let back: Iata = serde_json::from_str("\"BOS\"").unwrap();
        assert_eq!(back, bos);
        assert!(serde_json::from_str::<Iata>("\"bo\"").is_err());
    }
}
