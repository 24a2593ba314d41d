//! Human-readable byte size parsing for configuration values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const UNITS: &[(&str, u64)] = &[
    ("TB", 1 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
    ("B", 1),
];

#[derive(Debug, Error)]
pub enum ParseSizeError {
    #[error("invalid size: {0}")]
    Invalid(String),

    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// Byte count that deserializes from either an integer or a string
/// with a unit suffix, e.g. `"5MB"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ByteSize(pub u64);

impl ByteSize {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl FromStr for ByteSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (digits, unit) = s.split_at(split);

        let value: u64 = digits
            .parse()
            .map_err(|_| ParseSizeError::Invalid(s.to_string()))?;

        let unit = unit.trim().to_uppercase();
        if unit.is_empty() {
            return Ok(ByteSize(value));
        }

        UNITS
            .iter()
            .find(|(suffix, _)| *suffix == unit)
            .map(|(_, multiplier)| ByteSize(value * multiplier))
            .ok_or(ParseSizeError::UnknownUnit(unit))
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (suffix, multiplier) in UNITS {
            if self.0 >= *multiplier && self.0 % multiplier == 0 {
                return write!(f, "{}{}", self.0 / multiplier, suffix);
            }
        }
        write!(f, "{}B", self.0)
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SizeVisitor;

        impl serde::de::Visitor<'_> for SizeVisitor {
            type Value = ByteSize;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a byte size as string (e.g. \"5MB\") or integer")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ByteSize(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(v)
                    .map(ByteSize)
                    .map_err(|_| serde::de::Error::custom("byte size cannot be negative"))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_any(SizeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!("1024".parse::<ByteSize>().unwrap().as_u64(), 1024);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("1KB".parse::<ByteSize>().unwrap().as_u64(), 1024);
        assert_eq!("5MB".parse::<ByteSize>().unwrap().as_u64(), 5 * 1024 * 1024);
        assert_eq!("2gb".parse::<ByteSize>().unwrap().as_u64(), 2 << 30);
        assert_eq!("1TB".parse::<ByteSize>().unwrap().as_u64(), 1 << 40);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "MB".parse::<ByteSize>(),
            Err(ParseSizeError::Invalid(_))
        ));
        assert!(matches!(
            "5XB".parse::<ByteSize>(),
            Err(ParseSizeError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(ByteSize(1024).to_string(), "1KB");
        assert_eq!(ByteSize(5 * 1024 * 1024).to_string(), "5MB");
        assert_eq!(ByteSize(1500).to_string(), "1500B");
    }

    #[test]
    fn test_deserialize_string_and_number() {
        #[derive(Deserialize)]
        struct Wrapper {
            size: ByteSize,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{"size": "10MB"}"#).unwrap();
        assert_eq!(parsed.size.as_u64(), 10 * 1024 * 1024);

        let parsed: Wrapper = serde_json::from_str(r#"{"size": 512}"#).unwrap();
        assert_eq!(parsed.size.as_u64(), 512);
    }
}
