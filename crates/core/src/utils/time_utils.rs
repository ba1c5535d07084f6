use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::errors::{Error, Result};

/// Default timezone for business dates.
/// SIP due dates are calendar days in the investor's market, so "today" is
/// derived in this zone rather than in UTC.
pub const DEFAULT_BUSINESS_TZ: Tz = chrono_tz::Asia::Kolkata;

/// Converts a UTC instant to a business date in the given timezone.
///
/// This is the single source of truth for turning a batch's "now" into the
/// day it compares due dates against.
pub fn business_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Parses an IANA timezone name such as `Asia/Kolkata`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::InvalidConfigValue(format!("Unknown timezone '{}'", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn late_utc_evening_is_next_day_in_kolkata() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 31, 20, 0, 0).unwrap();
        assert_eq!(
            business_date_from_utc(instant, DEFAULT_BUSINESS_TZ),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
        );
        assert_eq!(
            business_date_from_utc(instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
    }

    #[test]
    fn rejects_unknown_timezone() {
        assert!(parse_timezone("Asia/Kolkata").is_ok());
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(Error::InvalidConfigValue(_))
        ));
    }
}
