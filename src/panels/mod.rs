//! CRUD panels behind the admin console.
//!
//! Each panel validates a form, stamps audit fields and issues single,
//! independent store operations. Failures become notices at this boundary;
//! nothing is retried.

mod dashboard;
mod matches;
mod schedules;
mod scores;
mod session;
mod users;
mod version;

pub use dashboard::*;
pub use matches::*;
pub use schedules::*;
pub use scores::*;
pub use session::*;
pub use users::*;
pub use version::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::errors::AppError;
use crate::store::Fields;

const INVALID_DATE: &str = "日期格式不正確";

/// Field map from a `json!` object literal.
pub(crate) fn object(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

/// Normalize a form date to the stored RFC 3339 format.
///
/// Accepts full RFC 3339, `datetime-local` values (`2024-05-01T18:30`) and
/// plain dates; the latter two are read as UTC. Blank input yields `None`.
pub(crate) fn normalize_timestamp(raw: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").map(|dt| dt.and_utc()))
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| d.and_time(NaiveTime::default()).and_utc())
        })
        .map_err(|_| AppError::Validation(INVALID_DATE.to_string()))?;

    Ok(Some(parsed.to_rfc3339_opts(SecondsFormat::Millis, true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_timestamp_formats() {
        assert_eq!(
            normalize_timestamp(Some("2024-05-01")).unwrap().as_deref(),
            Some("2024-05-01T00:00:00.000Z")
        );
        assert_eq!(
            normalize_timestamp(Some("2024-05-01T18:30")).unwrap().as_deref(),
            Some("2024-05-01T18:30:00.000Z")
        );
        assert_eq!(
            normalize_timestamp(Some("2024-05-01T18:30:00+08:00")).unwrap().as_deref(),
            Some("2024-05-01T10:30:00.000Z")
        );
        assert_eq!(normalize_timestamp(Some("  ")).unwrap(), None);
        assert_eq!(normalize_timestamp(None).unwrap(), None);
    }

    #[test]
    fn test_normalize_timestamp_rejects_garbage() {
        let err = normalize_timestamp(Some("next tuesday")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
