use chrono::{Months, NaiveDate};

use super::sips_model::SipFrequency;
use crate::errors::{CalculatorError, Result};

/// Returns the run date one `frequency` period after `date`.
///
/// Adds whole calendar months. When the day does not exist in the target
/// month it is clamped to that month's last day, so 2024-01-31 advances to
/// 2024-02-29 and 2023-01-31 to 2023-02-28.
pub fn advance_schedule(date: NaiveDate, frequency: SipFrequency) -> Result<NaiveDate> {
    let months = frequency.months();
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| CalculatorError::DateOutOfRange(date, months).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_keeps_day_of_month() {
        assert_eq!(
            advance_schedule(date(2024, 3, 1), SipFrequency::Monthly).unwrap(),
            date(2024, 4, 1)
        );
        assert_eq!(
            advance_schedule(date(2024, 12, 15), SipFrequency::Monthly).unwrap(),
            date(2025, 1, 15)
        );
    }

    #[test]
    fn month_end_clamps_to_leap_day() {
        assert_eq!(
            advance_schedule(date(2024, 1, 31), SipFrequency::Monthly).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            advance_schedule(date(2023, 1, 31), SipFrequency::Monthly).unwrap(),
            date(2023, 2, 28)
        );
        assert_eq!(
            advance_schedule(date(2024, 3, 31), SipFrequency::Monthly).unwrap(),
            date(2024, 4, 30)
        );
    }

    #[test]
    fn quarterly_adds_three_months_with_same_clamp() {
        assert_eq!(
            advance_schedule(date(2024, 1, 15), SipFrequency::Quarterly).unwrap(),
            date(2024, 4, 15)
        );
        assert_eq!(
            advance_schedule(date(2023, 11, 30), SipFrequency::Quarterly).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn out_of_range_is_an_error() {
        assert!(advance_schedule(NaiveDate::MAX, SipFrequency::Monthly).is_err());
    }
}
