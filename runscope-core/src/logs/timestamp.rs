use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::Serializer;

/// Convert backend epoch milliseconds to an absolute UTC instant.
///
/// Returns `None` only for values outside chrono's representable range.
pub fn from_epoch_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// ISO-8601 in UTC with a literal `Z`, fractional seconds only when present.
pub fn to_iso_utc(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a caller-supplied ISO-8601 instant.
///
/// Offsets (`Z`, `+02:00`) are normalized to UTC. A timestamp without an
/// offset is read as UTC.
pub fn parse_iso_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub(crate) fn serialize_iso<S: Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso_utc(instant))
}

pub(crate) fn serialize_iso_opt<S: Serializer>(
    instant: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match instant {
        Some(instant) => serializer.serialize_str(&to_iso_utc(instant)),
        None => serializer.serialize_none(),
    }
}
