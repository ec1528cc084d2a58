use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::consts::{DATE_FORMAT, DATETIME_FORMAT, MINUTES_FORMAT};
use crate::prelude::*;

/// Error type for widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Mode string is not one of `date`, `time`, `datetime`.
    #[error("Unknown display mode: {0} (expected date, time or datetime)")]
    UnknownMode(String),

    /// A configured min/max bound could not be normalized into a date.
    #[error("Unparseable {option} value: {value}")]
    InvalidBound { option: &'static str, value: String },
}

/// A min/max bound as it appears in widget configuration: either a Unix
/// timestamp or a free-form date string. Normalized once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Display, From)]
#[serde(untagged)]
pub enum BoundSpec {
    /// Seconds since the Unix epoch
    Timestamp(i64),
    /// Free-form date string, e.g. `2000-01-01`
    Text(String),
}

impl From<&str> for BoundSpec {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl BoundSpec {
    /// Normalizes the bound into a canonical date value.
    ///
    /// Accepted string shapes: `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM`,
    /// `YYYY-MM-DD` (midnight) and RFC 3339. `option` names the
    /// configuration key for error reporting.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidBound` if the timestamp is out of range
    /// or the string matches none of the accepted shapes.
    pub fn resolve(&self, option: &'static str) -> Result<NaiveDateTime, ConfigError> {
        match self {
            Self::Timestamp(secs) => DateTime::from_timestamp(*secs, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| ConfigError::InvalidBound {
                    option,
                    value: secs.to_string(),
                }),
            Self::Text(s) => parse_date_string(s).ok_or_else(|| ConfigError::InvalidBound {
                option,
                value: s.clone(),
            }),
        }
    }
}

/// Tries the accepted date string shapes in order of specificity
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, MINUTES_FORMAT) {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_utc())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_timestamp() {
        let bound = BoundSpec::from(1_577_836_800);
        let resolved = bound.resolve("min_date").unwrap();
        assert_eq!(resolved.to_string(), "2020-01-01 00:00:00");
    }

    #[test]
    fn test_timestamp_and_date_string_agree() {
        let from_timestamp = BoundSpec::from(1_577_836_800).resolve("min_date").unwrap();
        let from_string = BoundSpec::from("2020-01-01").resolve("min_date").unwrap();
        assert_eq!(from_timestamp, from_string);
    }

    #[test]
    fn test_resolve_datetime_string() {
        let resolved = BoundSpec::from("2020-12-31 23:59:59")
            .resolve("max_date")
            .unwrap();
        assert_eq!(resolved.to_string(), "2020-12-31 23:59:59");
    }

    #[test]
    fn test_resolve_minutes_string() {
        let resolved = BoundSpec::from("2020-12-31 23:59")
            .resolve("max_date")
            .unwrap();
        assert_eq!(resolved.to_string(), "2020-12-31 23:59:00");
    }

    #[test]
    fn test_resolve_rfc3339_string() {
        let resolved = BoundSpec::from("2020-06-01T12:00:00+02:00")
            .resolve("min_date")
            .unwrap();
        assert_eq!(resolved.to_string(), "2020-06-01 10:00:00");
    }

    #[test]
    fn test_resolve_invalid_string() {
        let result = BoundSpec::from("not-a-date").resolve("min_date");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidBound { option: "min_date", .. })
        ));
    }

    #[test]
    fn test_resolve_out_of_range_timestamp() {
        let result = BoundSpec::from(i64::MAX).resolve("max_date");
        assert!(matches!(result, Err(ConfigError::InvalidBound { .. })));
    }

    #[test]
    fn test_deserialize_untagged() {
        let spec: BoundSpec = serde_json::from_str("1577836800").unwrap();
        assert_eq!(spec, BoundSpec::Timestamp(1_577_836_800));

        let spec: BoundSpec = serde_json::from_str("\"2020-01-01\"").unwrap();
        assert_eq!(spec, BoundSpec::Text("2020-01-01".to_owned()));
    }
}
