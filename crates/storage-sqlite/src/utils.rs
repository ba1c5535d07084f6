//! Column codecs shared by the repositories.
//!
//! Decimals and dates are stored as TEXT so values round-trip exactly.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Fixed-width RFC 3339 in UTC so that TEXT ordering matches time ordering.
pub(crate) fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

pub(crate) fn parse_decimal(value: &str, column: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim())
        .map_err(|e| format!("invalid {} '{}': {}", column, value, e))
}

pub(crate) fn parse_date(value: &str, column: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| format!("invalid {} '{}': {}", column, value, e))
}

pub(crate) fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid {} '{}': {}", column, value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn timestamps_sort_lexicographically() {
        let earlier = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
        assert!(format_timestamp(earlier) < format_timestamp(later));
        assert_eq!(
            parse_timestamp(&format_timestamp(later), "executed_at").unwrap(),
            later
        );
    }

    #[test]
    fn decimals_keep_their_scale_free_value() {
        assert_eq!(format_decimal(dec!(5000.00)), "5000");
        assert_eq!(parse_decimal("53.3333", "average_price").unwrap(), dec!(53.3333));
        assert!(parse_decimal("abc", "amount").is_err());
    }

    #[test]
    fn dates_reject_other_layouts() {
        assert!(parse_date("2024-02-29", "next_execution_date").is_ok());
        assert!(parse_date("29/02/2024", "next_execution_date").is_err());
    }
}
