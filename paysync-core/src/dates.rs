//! Timestamp parsing for the three formats the remote API emits: ISO 8601
//! UTC datetimes, ISO 8601 calendar dates, and RFC 5322 (rate-limit reset
//! header only).

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unrecognized timestamp: {0}")]
pub struct DateParseError(String);

/// The host's current UTC offset. Calendar dates are anchored with this
/// single offset rather than the offset in force on the historical date, so
/// daylight-saving shifts are not applied twice.
pub fn host_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Parse an ISO 8601 UTC datetime (`2024-05-01T10:15:00.000Z`) or a
/// date-only value (`2024-05-01`) into a point in time.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DateParseError> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DateParseError(value.to_string()))?;
    host_offset()
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
        .map(|datetime| datetime.with_timezone(&Utc))
        .ok_or_else(|| DateParseError(value.to_string()))
}

/// Parse an RFC 5322 timestamp as carried by the rate-limit reset header.
pub fn parse_http_date(value: &str) -> Result<DateTime<Utc>, DateParseError> {
    DateTime::parse_from_rfc2822(value)
        .map(|datetime| datetime.with_timezone(&Utc))
        .map_err(|_| DateParseError(value.to_string()))
}

/// Calendar date of an instant, seen from the host's current offset.
pub fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&host_offset()).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_iso_datetime() {
        let parsed = parse_timestamp("2024-05-01T10:15:00.250Z").unwrap();
        assert_eq!(parsed.hour(), 10);
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn parses_date_only_at_host_offset() {
        let parsed = parse_timestamp("2024-05-01").unwrap();
        let expected = host_offset()
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 5, 1)
                    .unwrap()
                    .and_time(NaiveTime::MIN),
            )
            .single()
            .unwrap();
        assert_eq!(parsed, expected.with_timezone(&Utc));
    }

    #[test]
    fn parses_rfc5322_reset_header() {
        let parsed = parse_http_date("Wed, 01 May 2024 10:15:00 GMT").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T10:15:00+00:00");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_timestamp("05/01/2024").is_err());
        assert!(parse_http_date("2024-05-01T10:15:00Z").is_err());
    }
}
