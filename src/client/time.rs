use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an event timestamp the way a browser's `Date` constructor would:
/// RFC 3339 as-is, date-times without offset in local time, bare dates as
/// UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(raw, &Local)
}

pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Joins a `YYYY-MM-DD` date and an `HH:MM[:SS]` time read in `tz`.
pub fn combine_date_time<Tz: TimeZone>(date: &str, time: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .ok()?;
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `2025-01-01T13:00:00.000Z`
pub fn to_iso_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        assert_eq!(
            parse_timestamp("2025-06-10T18:30:00.000Z"),
            Some(utc(2025, 6, 10, 18, 30))
        );
        assert_eq!(
            parse_timestamp("2025-06-10T15:30:00-03:00"),
            Some(utc(2025, 6, 10, 18, 30))
        );
    }

    #[test]
    fn naive_date_time_uses_given_zone() {
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(
            parse_timestamp_in("2025-06-10T15:30", &sao_paulo),
            Some(utc(2025, 6, 10, 18, 30))
        );
        assert_eq!(
            parse_timestamp_in("2025-06-10 15:30:00", &sao_paulo),
            Some(utc(2025, 6, 10, 18, 30))
        );
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(
            parse_timestamp_in("2025-01-01", &sao_paulo),
            Some(utc(2025, 1, 1, 0, 0))
        );
    }

    #[test]
    fn garbage_does_not_parse() {
        assert_eq!(parse_timestamp("amanhã"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn combines_form_fields_into_iso() {
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        let dt = combine_date_time("2025-01-01", "10:00", &sao_paulo).unwrap();
        assert_eq!(to_iso_string(&dt), "2025-01-01T13:00:00.000Z");

        assert!(combine_date_time("2025-13-01", "10:00", &sao_paulo).is_none());
        assert!(combine_date_time("2025-01-01", "25:00", &sao_paulo).is_none());
    }
}
