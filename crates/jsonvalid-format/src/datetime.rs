//! RFC 3339 §5.6 date and time formats.

use chrono::DateTime;

use crate::FormatError;

/// Full `date-time` form: `full-date "T" full-time`.
pub fn is_valid_date_time(date_time: &str) -> Result<(), FormatError> {
    DateTime::parse_from_rfc3339(date_time)
        .map(|_| ())
        .map_err(|e| FormatError::new(format!("not an RFC 3339 date-time: {e}")))
}

/// `full-date`, checked by appending a fixed time-of-day.
pub fn is_valid_date(date: &str) -> Result<(), FormatError> {
    is_valid_date_time(&format!("{date}T00:00:00.0Z"))
}

/// `full-time`, checked by prepending a fixed date.
pub fn is_valid_time(time: &str) -> Result<(), FormatError> {
    is_valid_date_time(&format!("1991-02-21T{time}"))
}
