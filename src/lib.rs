mod bounds;
mod consts;
mod prelude;
mod types;

pub use bounds::{BoundSpec, ConfigError};
pub use consts::*;
pub use types::{DisplayMode, DisplayPair, FieldHost, LoadedValue, SavedValue};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use types::truncate_chars;

/// Configuration of a date picker field as declared by the enclosing form
/// framework. Unset options fall back to the widget defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Display format handed to the rendering layer, not interpreted here
    pub format: String,

    /// Display mode name, case-insensitive
    pub mode: String,

    /// Earliest selectable date
    #[serde(alias = "minDate")]
    pub min_date: Option<BoundSpec>,

    /// Latest selectable date
    #[serde(alias = "maxDate")]
    pub max_date: Option<BoundSpec>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            format:   DEFAULT_FORMAT.to_owned(),
            mode:     DEFAULT_MODE.to_owned(),
            min_date: None,
            max_date: None,
        }
    }
}

/// The value layer of a date/time picker form field.
///
/// Holds the configuration resolved once at construction and converts
/// between stored values and the split date/time inputs the picker renders.
/// Read-only after construction, so shared use across renders is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateField {
    format:   String,
    mode:     DisplayMode,
    min_date: Option<NaiveDateTime>,
    max_date: Option<NaiveDateTime>,
}

/// Everything the templating partial consumes for one render of the field.
/// Derived freshly per render; nothing here is cached or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext<'a> {
    /// Name of the primary form input
    pub name: &'a str,
    /// Name of the companion time input (datetime mode submits through it)
    pub time_name: String,
    /// Primary input value
    pub value: String,
    /// Companion `HH:MM` input value, datetime mode only
    pub time_value: Option<String>,
    /// Display format for the client-side picker
    pub format: &'a str,
    /// Resolved display mode
    pub mode: DisplayMode,
    /// Earliest selectable date, enforced by the client-side picker
    pub min_date: Option<NaiveDateTime>,
    /// Latest selectable date, enforced by the client-side picker
    pub max_date: Option<NaiveDateTime>,
}

impl DateField {
    /// Builds a field from its declared options, normalizing the mode and
    /// the min/max bounds.
    ///
    /// # Errors
    /// Returns `ConfigError` if the mode string is unknown or a bound
    /// cannot be parsed into a date.
    pub fn new(options: FieldOptions) -> Result<Self, ConfigError> {
        let mode = options.mode.parse::<DisplayMode>()?;

        let min_date = options
            .min_date
            .map(|spec| spec.resolve("min_date"))
            .transpose()?;
        let max_date = options
            .max_date
            .map(|spec| spec.resolve("max_date"))
            .transpose()?;

        Ok(Self {
            format: options.format,
            mode,
            min_date,
            max_date,
        })
    }

    /// Returns the resolved display mode
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Returns the display format handed to the rendering layer
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the normalized earliest selectable date, if configured
    pub const fn min_date(&self) -> Option<NaiveDateTime> {
        self.min_date
    }

    /// Returns the normalized latest selectable date, if configured
    pub const fn max_date(&self) -> Option<NaiveDateTime> {
        self.max_date
    }

    /// Name of the companion time input paired with `name`.
    /// Computed once here so callers never rebuild the convention ad hoc.
    pub fn time_field_name(name: &str) -> String {
        format!("{TIME_FIELD_PREFIX}{name}")
    }

    /// Normalizes a loaded value into display-ready sub-values.
    ///
    /// An absent or empty value yields the empty pair in every mode. In
    /// datetime mode the value splits on the first space into the date
    /// input and an `HH:MM` time input; in date mode a stored string is
    /// truncated to its first 10 characters; in time mode strings pass
    /// through unchanged. Pure and infallible.
    pub fn display_pair(&self, loaded: Option<&LoadedValue>) -> DisplayPair {
        let Some(loaded) = loaded.filter(|value| !value.is_empty()) else {
            return DisplayPair::empty();
        };

        match self.mode {
            DisplayMode::DateTime => {
                let rendered = loaded.to_datetime_string();
                match rendered.split_once(DATETIME_SEPARATOR) {
                    Some((date, time)) => DisplayPair {
                        primary: date.to_owned(),
                        time:    Some(truncate_chars(time, TIME_DISPLAY_LEN)),
                    },
                    None => DisplayPair {
                        primary: rendered,
                        time:    Some(String::new()),
                    },
                }
            }
            DisplayMode::Date => DisplayPair {
                primary: match loaded {
                    LoadedValue::Text(s) => truncate_chars(s, DATE_DISPLAY_LEN),
                    LoadedValue::Moment(_) => loaded.to_date_string(),
                },
                time:    None,
            },
            DisplayMode::Time => DisplayPair {
                primary: loaded.to_time_string(),
                time:    None,
            },
        }
    }

    /// Reconstructs the storable value from submitted input.
    ///
    /// A disabled field is skipped before any value interpretation; an
    /// empty primary clears the field. In datetime mode a non-empty time
    /// input is appended with `:00` seconds; in time mode the primary is
    /// truncated to `HH:MM` and given `:00` seconds. Anything else passes
    /// through unchanged. Malformed input yields a malformed string by
    /// design; validation belongs to the caller.
    pub fn save_value(
        &self,
        primary: &str,
        time_input: Option<&str>,
        disabled: bool,
    ) -> SavedValue {
        if disabled {
            return SavedValue::Skip;
        }
        if primary.is_empty() {
            return SavedValue::Clear;
        }

        match self.mode {
            DisplayMode::DateTime => match time_input.filter(|time| !time.is_empty()) {
                Some(time) => SavedValue::Value(format!(
                    "{primary}{DATETIME_SEPARATOR}{time}{SECONDS_SUFFIX}"
                )),
                None => SavedValue::Value(primary.to_owned()),
            },
            DisplayMode::Time => SavedValue::Value(format!(
                "{}{SECONDS_SUFFIX}",
                truncate_chars(primary, TIME_DISPLAY_LEN)
            )),
            DisplayMode::Date => SavedValue::Value(primary.to_owned()),
        }
    }

    /// Reconstructs the storable value for a framework-hosted field,
    /// consulting the host for the disabled flag.
    pub fn save_value_for(
        &self,
        host: &impl FieldHost,
        primary: &str,
        time_input: Option<&str>,
    ) -> SavedValue {
        self.save_value(primary, time_input, host.is_disabled())
    }

    /// Bundles the variables one render of the field needs: input names,
    /// the display pair for the host's current value, and the resolved
    /// configuration.
    pub fn render_context<'a>(&'a self, host: &'a impl FieldHost) -> RenderContext<'a> {
        let pair = self.display_pair(host.loaded_value().as_ref());
        RenderContext {
            name: host.field_name(),
            time_name: Self::time_field_name(host.field_name()),
            value: pair.primary,
            time_value: pair.time,
            format: &self.format,
            mode: self.mode,
            min_date: self.min_date,
            max_date: self.max_date,
        }
    }
}
