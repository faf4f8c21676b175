//! Tolerant decoders for display fields.
//!
//! Records are written by more than one client, so a display field may hold
//! a number or a boolean where text is expected. These decoders keep such
//! values instead of rejecting the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::PlayStatus;

/// Text field. Numbers and booleans are kept as their JSON text; anything
/// else reads as absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Status field. Values that are not a status string read as `Unknown`.
pub fn status<'de, D>(deserializer: D) -> Result<Option<PlayStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => Some(serde_json::from_value(value).unwrap_or(PlayStatus::Unknown)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "text")]
        label: Option<String>,
        #[serde(default, deserialize_with = "status")]
        status: Option<PlayStatus>,
    }

    fn read(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_accepts_scalars() {
        assert_eq!(read(json!({ "label": "Alice" })).label.as_deref(), Some("Alice"));
        assert_eq!(read(json!({ "label": 7 })).label.as_deref(), Some("7"));
        assert_eq!(read(json!({ "label": true })).label.as_deref(), Some("true"));
        assert_eq!(read(json!({ "label": { "x": 1 } })).label, None);
        assert_eq!(read(json!({ "label": null })).label, None);
        assert_eq!(read(json!({})).label, None);
    }

    #[test]
    fn test_status_falls_back_to_unknown() {
        assert_eq!(read(json!({ "status": "ongoing" })).status, Some(PlayStatus::Ongoing));
        assert_eq!(read(json!({ "status": 1 })).status, Some(PlayStatus::Unknown));
        assert_eq!(read(json!({ "status": null })).status, None);
        assert_eq!(read(json!({})).status, None);
    }
}
