//! Serde helpers for the API's wire formats
//!
//! The backend emits timestamps both with and without an offset and ids as
//! either strings or numbers. These helpers accept all of them and always
//! write RFC 3339 / strings back.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

/// Parse a timestamp in any of the formats the API or a user may produce
///
/// Accepts RFC 3339, offset-less ISO 8601 with or without seconds, and a
/// bare date (midnight UTC). Offset-less values are read as UTC.
///
/// # Errors
///
/// Returns a message naming the rejected input.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("unrecognized timestamp '{raw}'"))
}

/// Required timestamp field
pub mod timestamp {
    use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, de, parse_timestamp};

    /// # Errors
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    /// # Errors
    /// Fails when the string is not a recognized timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(de::Error::custom)
    }
}

/// Optional timestamp field; `null`, missing and `""` all read as `None`
pub mod timestamp_opt {
    use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, de, parse_timestamp};

    /// # Errors
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    /// Fails when a non-empty string is not a recognized timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse_timestamp(&raw).map(Some).map_err(de::Error::custom),
            _ => Ok(None),
        }
    }
}

/// Identifier that may arrive as a JSON string or number
///
/// # Errors
///
/// Fails for any other JSON type.
pub fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// Optional variant of [`id_string`]; `null` reads as `None`
///
/// # Errors
///
/// Fails for any JSON type other than string, number or null.
pub fn id_string_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2025-03-14T19:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 17);
    }

    #[test]
    fn test_parse_offsetless_as_utc() {
        let dt = parse_timestamp("2025-03-14T19:30:00.123").unwrap();
        assert_eq!(dt.hour(), 19);
        let dt = parse_timestamp("2025-03-14T19:30").unwrap();
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_timestamp("2025-12-31").unwrap();
        assert_eq!(dt.day(), 31);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("next tuesday").unwrap_err();
        assert!(err.contains("next tuesday"));
    }

    #[test]
    fn test_id_accepts_numbers() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "id_string")]
            id: String,
        }

        let numeric: Wrapper = serde_json::from_str(r#"{ "id": 42 }"#).unwrap();
        assert_eq!(numeric.id, "42");
        let text: Wrapper = serde_json::from_str(r#"{ "id": "b3c1" }"#).unwrap();
        assert_eq!(text.id, "b3c1");
    }
}
