//! Lenient parsing of optional due dates.
//!
//! The API accepts a due date as an RFC 3339 string, a plain `YYYY-MM-DD`
//! date, or a milliseconds-since-epoch number. Absent and `null` values
//! mean "no due date".

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::error::AppError;

/// Parses the raw JSON value of a `dueDate` field.
///
/// Returns `Ok(None)` for absent/null input, `Ok(Some(..))` for a parseable
/// string or numeric timestamp, and `AppError::BadRequest` for anything else.
pub fn parse_optional_date(value: Option<&Value>) -> Result<Option<DateTime<Utc>>, AppError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };

    match value {
        Value::String(s) => parse_date_string(s).map(Some),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .ok_or_else(|| AppError::BadRequest("Invalid date format".into()))?;
            Utc.timestamp_millis_opt(millis)
                .single()
                .map(Some)
                .ok_or_else(|| AppError::BadRequest("Invalid date format".into()))
        }
        _ => Err(AppError::BadRequest("Invalid date input type".into())),
    }
}

fn parse_date_string(s: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Date-only input resolves to midnight UTC.
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&dt));
        }
    }

    Err(AppError::BadRequest("Invalid date format".into()))
}
