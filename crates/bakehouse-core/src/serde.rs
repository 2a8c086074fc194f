// This module shadows the `serde` crate, hence the `::serde` paths.
use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};

/// Serialize a timestamp as RFC 3339 with exactly three fractional digits,
/// e.g. `2026-08-29T07:15:00.250Z`. Use with `#[serde(serialize_with)]` on
/// response timestamp fields so every service emits the same shape.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
