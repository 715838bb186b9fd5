use chrono::{DateTime, Local, Utc};

/// Current wall-clock time in UTC.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format a UTC timestamp as a local `HH:MM:SS` clock reading.
pub fn to_local_clock(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Convert a UTC timestamp to microseconds since the Unix epoch.
pub fn to_unix_micros(timestamp: &DateTime<Utc>) -> i64 {
    timestamp.timestamp_micros()
}

/// Convert microseconds since the Unix epoch back to a UTC timestamp.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn from_unix_micros(micros: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
}
