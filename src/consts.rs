/// Prefix joined to a field name to derive its companion time-input name
pub const TIME_FIELD_PREFIX: &str = "___time_";

/// Default display format handed to the rendering layer (opaque to this crate)
pub const DEFAULT_FORMAT: &str = "YYYY-MM-DD";

/// Default display mode
pub const DEFAULT_MODE: &str = "datetime";

/// Characters kept when truncating a value to its date portion (`YYYY-MM-DD`)
pub const DATE_DISPLAY_LEN: usize = 10;

/// Characters kept when truncating a value to hours and minutes (`HH:MM`)
pub const TIME_DISPLAY_LEN: usize = 5;

/// Seconds appended when reconstructing a storable value from `HH:MM` input
pub const SECONDS_SUFFIX: &str = ":00";

/// Separator between the date and time-of-day portions of a datetime string
pub const DATETIME_SEPARATOR: char = ' ';

/// Rendering format for a full datetime moment
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Rendering format for the date portion only
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
/// Rendering format for the time-of-day portion only
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";
/// Bound string accepted without seconds
pub(crate) const MINUTES_FORMAT: &str = "%Y-%m-%d %H:%M";
