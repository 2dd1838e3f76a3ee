//! Timestamp serde helpers for recipe and cache records.
//!
//! Written as RFC 3339 in UTC with millisecond precision (`2025-01-02T03:04:05.678Z`).
//! Read from RFC 3339 with any offset, or from a Unix timestamp in seconds or
//! milliseconds, which older exports and SQLite rows may carry.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Canonical string form of a timestamp.
pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 string into UTC.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(dt))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Unix(i64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => parse(&s).ok_or_else(|| Error::custom(format!("Invalid RFC3339 timestamp: {s}"))),
        Raw::Unix(ts) => from_unix(ts).ok_or_else(|| Error::custom("Invalid Unix timestamp")),
    }
}

/// Values above 10^11 are milliseconds, anything else is seconds.
fn from_unix(ts: i64) -> Option<DateTime<Utc>> {
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
