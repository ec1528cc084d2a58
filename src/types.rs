use crate::consts::{DATE_FORMAT, DATETIME_FORMAT, TIME_FORMAT};
use crate::ConfigError;
use crate::prelude::*;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::str::FromStr;

/// Display mode of the picker: date only, time only, or combined.
/// Fixed at construction, selects which transformation rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum DisplayMode {
    /// Date portion only (`YYYY-MM-DD`)
    #[display(fmt = "date")]
    Date,
    /// Time-of-day portion only (`HH:MM:SS`)
    #[display(fmt = "time")]
    Time,
    /// Combined date and time, rendered as two paired inputs
    #[default]
    #[display(fmt = "datetime")]
    DateTime,
}

impl DisplayMode {
    /// Returns the lowercase configuration name of the mode
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = ConfigError;

    /// Parses a configured mode string, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "datetime" => Ok(Self::DateTime),
            _ => Err(ConfigError::UnknownMode(s.to_owned())),
        }
    }
}

impl serde::Serialize for DisplayMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for DisplayMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Value currently associated with the field, as handed over by the
/// enclosing framework. Either an opaque string from storage or an
/// already-parsed moment.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum LoadedValue {
    /// Raw stored string, passed through with at most truncation
    Text(String),
    /// Parsed date/time moment, rendered explicitly per mode
    Moment(NaiveDateTime),
}

impl From<&str> for LoadedValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl LoadedValue {
    /// True for an empty text value; a parsed moment is never empty
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Moment(_) => false,
        }
    }

    /// Renders the full `YYYY-MM-DD HH:MM:SS` form; text passes through
    pub fn to_datetime_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Moment(dt) => dt.format(DATETIME_FORMAT).to_string(),
        }
    }

    /// Renders the `YYYY-MM-DD` date portion; text passes through
    pub fn to_date_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Moment(dt) => dt.format(DATE_FORMAT).to_string(),
        }
    }

    /// Renders the `HH:MM:SS` time-of-day portion; text passes through
    pub fn to_time_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Moment(dt) => dt.format(TIME_FORMAT).to_string(),
        }
    }
}

/// Display-ready sub-values derived from a loaded value.
/// `time` is populated only in datetime mode with a non-empty value;
/// it may then still be `Some("")` when the value carries no time-of-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPair {
    /// Primary input value: the date, or the whole value outside datetime mode
    pub primary: String,
    /// Companion `HH:MM` input value, datetime mode only
    pub time:    Option<String>,
}

impl DisplayPair {
    /// The pair rendered for an absent or empty loaded value
    pub const fn empty() -> Self {
        Self {
            primary: String::new(),
            time:    None,
        }
    }
}

/// Outcome of reconstructing a storable value from submitted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedValue {
    /// Exclude the field from the persistence payload entirely
    Skip,
    /// Persist an absent value, clearing the field
    Clear,
    /// Persist the reconstructed string as-is
    Value(String),
}

impl SavedValue {
    /// True when the field must be left out of the payload
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    /// Collapses to the persisted value: `None` means the decision is
    /// `Skip`; `Some(None)` clears the field; `Some(Some(s))` stores `s`.
    pub fn into_payload(self) -> Option<Option<String>> {
        match self {
            Self::Skip => None,
            Self::Clear => Some(None),
            Self::Value(s) => Some(Some(s)),
        }
    }
}

/// Capabilities the enclosing form framework provides for one field.
/// Injected into the widget instead of being inherited from a base class.
pub trait FieldHost {
    /// Name of the bound form field
    fn field_name(&self) -> &str;

    /// Whether the field is disabled for the current request
    fn is_disabled(&self) -> bool;

    /// Value currently associated with the field, if any
    fn loaded_value(&self) -> Option<LoadedValue>;
}

/// Truncates to at most `max` characters, respecting codepoint boundaries
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn moment(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .unwrap()
    }

    #[test]
    fn test_mode_parse_lowercase() {
        assert_eq!("date".parse::<DisplayMode>().unwrap(), DisplayMode::Date);
        assert_eq!("time".parse::<DisplayMode>().unwrap(), DisplayMode::Time);
        assert_eq!(
            "datetime".parse::<DisplayMode>().unwrap(),
            DisplayMode::DateTime
        );
    }

    #[test]
    fn test_mode_parse_case_insensitive() {
        assert_eq!(
            "DateTime".parse::<DisplayMode>().unwrap(),
            DisplayMode::DateTime
        );
        assert_eq!("TIME".parse::<DisplayMode>().unwrap(), DisplayMode::Time);
        assert_eq!(" Date ".parse::<DisplayMode>().unwrap(), DisplayMode::Date);
    }

    #[test]
    fn test_mode_parse_unknown() {
        let result = "stardate".parse::<DisplayMode>();
        assert!(matches!(result, Err(ConfigError::UnknownMode(_))));
    }

    #[test]
    fn test_mode_default_and_display() {
        assert_eq!(DisplayMode::default(), DisplayMode::DateTime);
        assert_eq!(DisplayMode::Date.to_string(), "date");
        assert_eq!(DisplayMode::DateTime.as_str(), "datetime");
    }

    #[test]
    fn test_mode_serde() {
        let json = serde_json::to_string(&DisplayMode::Time).unwrap();
        assert_eq!(json, "\"time\"");

        let parsed: DisplayMode = serde_json::from_str("\"DATETIME\"").unwrap();
        assert_eq!(parsed, DisplayMode::DateTime);
    }

    #[test]
    fn test_loaded_value_renderers() {
        let value = LoadedValue::Moment(moment(2020, 3, 4, 15, 6, 30));
        assert_eq!(value.to_datetime_string(), "2020-03-04 15:06:30");
        assert_eq!(value.to_date_string(), "2020-03-04");
        assert_eq!(value.to_time_string(), "15:06:30");
    }

    #[test]
    fn test_loaded_value_text_passthrough() {
        let value = LoadedValue::from("2020-03-04 15:06:30");
        assert_eq!(value.to_datetime_string(), "2020-03-04 15:06:30");
        assert_eq!(value.to_date_string(), "2020-03-04 15:06:30");
    }

    #[test]
    fn test_loaded_value_is_empty() {
        assert!(LoadedValue::from("").is_empty());
        assert!(!LoadedValue::from("x").is_empty());
        assert!(!LoadedValue::Moment(moment(2020, 1, 1, 0, 0, 0)).is_empty());
    }

    #[test]
    fn test_saved_value_into_payload() {
        assert_eq!(SavedValue::Skip.into_payload(), None);
        assert_eq!(SavedValue::Clear.into_payload(), Some(None));
        assert_eq!(
            SavedValue::Value("x".to_owned()).into_payload(),
            Some(Some("x".to_owned()))
        );
        assert!(SavedValue::Skip.is_skip());
        assert!(!SavedValue::Clear.is_skip());
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        // must cut on codepoint boundaries, not bytes
        assert_eq!(truncate_chars("äöüäöüäöüäöü", 10), "äöüäöüäöüä");
        assert_eq!(truncate_chars("15:06", 5), "15:06");
        assert_eq!(truncate_chars("15", 5), "15");
    }
}
