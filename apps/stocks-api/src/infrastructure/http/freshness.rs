//! HTTP-date handling for `Last-Modified` / `If-Modified-Since`.

use chrono::{DateTime, NaiveDateTime, Utc};

/// IMF-fixdate, e.g. `Mon, 15 Oct 2012 07:20:00 GMT`.
const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Obsolete RFC 850 form, e.g. `Monday, 15-Oct-12 07:20:00 GMT`.
const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S GMT";

/// ANSI C `asctime()` form, e.g. `Mon Oct 15 07:20:00 2012`.
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// Format `time` as an IMF-fixdate. Sub-second precision is dropped.
#[must_use]
pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format(IMF_FIXDATE).to_string()
}

/// Parse an HTTP-date in any of the three accepted forms.
///
/// Returns `None` for anything unparseable; callers treat that as an
/// absent header.
#[must_use]
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(time) = DateTime::parse_from_rfc2822(value) {
        return Some(time.with_timezone(&Utc));
    }

    [RFC_850, ASCTIME]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}
