use chrono::{DateTime, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;

/// A row of the `blogs` table, serialized as-is in API responses.
///
/// Stored timestamps are UTC; they go out with a `Z` designator.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(serialize_with = "serialize_utc")]
    pub timestamp: NaiveDateTime,
}

fn serialize_utc<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Writable fields of a blog post, shared by create and update.
///
/// A missing `timestamp` means "now" on create and "unchanged" on update.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogInput {
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<NaiveDateTime>,
}

/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, normalized to UTC) as well as
/// naive `2024-05-01T10:00:00` / `2024-05-01 10:00:00` values.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_timestamp(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_rfc3339_as_utc() {
        let parsed = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.to_string(), "2024-05-01 10:00:00");
    }

    #[test]
    fn parses_naive_forms() {
        assert!(parse_timestamp("2024-05-01T10:00:00").is_some());
        assert!(parse_timestamp("2024-05-01 10:00:00.250").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn timestamp_is_optional() {
        let input: BlogInput = serde_json::from_value(json!({
            "title": "Hello",
            "content": "First post",
            "author": "ada"
        }))
        .unwrap();
        assert!(input.timestamp.is_none());

        let input: BlogInput = serde_json::from_value(json!({
            "title": "Hello",
            "content": "First post",
            "author": "ada",
            "timestamp": null
        }))
        .unwrap();
        assert!(input.timestamp.is_none());
    }

    #[test]
    fn serializes_timestamp_as_utc() {
        let blog = Blog {
            id: 1,
            title: "Hello".to_string(),
            content: "First post".to_string(),
            author: "ada".to_string(),
            timestamp: parse_timestamp("2024-05-01T12:00:00+02:00").unwrap(),
        };
        let value = serde_json::to_value(&blog).unwrap();
        assert_eq!(value["timestamp"], "2024-05-01T10:00:00Z");

        // What goes out parses back to the same instant
        let echoed = value["timestamp"].as_str().unwrap();
        assert_eq!(parse_timestamp(echoed), Some(blog.timestamp));
    }

    #[test]
    fn rejects_missing_title() {
        let result = serde_json::from_value::<BlogInput>(json!({
            "content": "First post",
            "author": "ada"
        }));
        assert!(result.is_err());
    }
}
