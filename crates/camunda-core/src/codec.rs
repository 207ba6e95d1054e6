//! Translation between the engine's JSON shape and entity values.
//!
//! Entities derive serde with camelCase wire names and skip absent optionals
//! on output, so `decode(encode(e)) == e` holds for every entity.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::DecodeError;

/// An entity with a wire representation in the Camunda REST API.
pub trait Entity: Serialize + DeserializeOwned {
    /// Human-readable kind name used in decode errors.
    const KIND: &'static str;

    /// Build the entity from a single JSON object.
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        if !raw.is_object() {
            return Err(DecodeError::NotAnObject { kind: Self::KIND });
        }
        Self::deserialize(raw).map_err(|e| DecodeError::from_serde(Self::KIND, e))
    }

    /// Render the entity back to its wire object.
    fn encode(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        }
    }
}

/// Decode a JSON array element by element, keeping the engine's order.
///
/// An empty object (what the gateway returns for 204 or an empty body) is an
/// empty list.
pub fn decode_list<E: Entity>(raw: &Value) -> Result<Vec<E>, DecodeError> {
    match raw {
        Value::Array(items) => items.iter().map(E::decode).collect(),
        Value::Object(fields) if fields.is_empty() => Ok(Vec::new()),
        _ => Err(DecodeError::NotAnArray { kind: E::KIND }),
    }
}

/// Parse an ISO-8601 timestamp as sent by the engine.
///
/// Accepts RFC 3339 (`Z` or `+00:00` offsets), the Camunda default
/// `yyyy-MM-dd'T'HH:mm:ss.SSSZ` form with a colon-less offset (`+0000`), and
/// offset-less local times, which are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render a timestamp in the engine's default date format.
///
/// Millisecond precision is used unless the value carries finer digits, which
/// are kept so that no information is lost.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    if dt.nanosecond() % 1_000_000 == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.f%z").to_string()
    }
}

/// Serde adapter for optional engine timestamps.
///
/// Use with `#[serde(default, with = "crate::codec::timestamp")]`.
pub mod timestamp {
    use super::*;
    use serde::de::Error;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&format_timestamp(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) => parse_timestamp(&text)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("malformed timestamp '{}'", text))),
        }
    }
}

/// Booleans the engine may send as `null`; absent and `null` both read as false.
pub(crate) fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Task;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_timestamp_zulu() {
        let dt = parse_timestamp("2024-01-01T10:00:00.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_camunda_offset() {
        let dt = parse_timestamp("2024-01-01T12:00:00.000+0200").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let dt = parse_timestamp("2024-01-01T10:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_format_timestamp_millis() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(format_timestamp(&dt), "2024-01-01T10:00:00.000+0000");
    }

    #[test]
    fn test_format_timestamp_keeps_fine_precision() {
        let dt = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(parse_timestamp(&format_timestamp(&dt)), Some(dt));
    }

    #[test]
    fn test_null_reads_as_absent() {
        let task = Task::decode(&json!({"id": "t", "name": null, "due": null, "suspended": null}))
            .unwrap();
        assert_eq!(task.name, None);
        assert_eq!(task.due, None);
        assert!(!task.suspended);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert_eq!(
            Task::decode(&json!([1, 2])).unwrap_err(),
            DecodeError::NotAnObject { kind: "Task" }
        );
    }

    #[test]
    fn test_decode_list_empty_object_is_empty_list() {
        let tasks: Vec<Task> = decode_list(&json!({})).unwrap();
        assert!(tasks.is_empty());

        assert_eq!(
            decode_list::<Task>(&json!({"id": "t"})).unwrap_err(),
            DecodeError::NotAnArray { kind: "Task" }
        );
    }
}
