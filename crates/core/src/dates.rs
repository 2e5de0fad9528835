use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Timestamp shape the remote service accepts on writes:
/// `2026-01-28T07:30:00.000+0000` (millisecond precision, literal +0000).
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Parse a timestamp as the remote emits it. Tolerates a missing
/// millisecond component and plain RFC 3339 (`+00:00` / `Z` offsets).
pub fn parse_wire_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, WIRE_FORMAT)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

pub fn format_wire_datetime(instant: DateTime<Utc>) -> String {
    instant.format(WIRE_FORMAT).to_string()
}

/// The calendar day a UTC instant falls on in the viewer's zone. A task due
/// 23:00 UTC can be "tomorrow" locally; all date-bucket comparisons go
/// through this conversion.
pub fn local_day(raw: &str, offset: FixedOffset) -> Option<NaiveDate> {
    parse_wire_datetime(raw).map(|instant| instant.with_timezone(&offset).date_naive())
}
