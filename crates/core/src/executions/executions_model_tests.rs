#[cfg(test)]
mod tests {
    use crate::executions::{ExecutionStatus, NewExecutionRecord};
    use crate::sips::{Sip, SipFrequency};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sip() -> Sip {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Sip {
            id: "sip-1".to_string(),
            user_id: "user-1".to_string(),
            trading_symbol: "INF846K01DP8".to_string(),
            scheme_name: "Axis Bluechip Fund".to_string(),
            amount: dec!(5000),
            frequency: SipFrequency::Monthly,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            next_execution_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            active: true,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn executed_record_carries_nav_and_units() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 6, 30, 0).unwrap();
        let record = NewExecutionRecord::executed(&sip(), dec!(50), dec!(100), at);

        assert_eq!(record.status, ExecutionStatus::Executed);
        assert_eq!(record.sip_id, "sip-1");
        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.amount, dec!(5000));
        assert_eq!(record.nav, dec!(50));
        assert_eq!(record.units, dec!(100));
        assert!(record.error.is_none());
    }

    #[test]
    fn failed_record_zeroes_nav_and_units() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 6, 30, 0).unwrap();
        let record = NewExecutionRecord::failed(&sip(), "Price not found for XYZ", at);

        assert_eq!(record.status, ExecutionStatus::Failed);
        assert_eq!(record.amount, dec!(5000));
        assert_eq!(record.nav, Decimal::ZERO);
        assert_eq!(record.units, Decimal::ZERO);
        assert_eq!(record.error.as_deref(), Some("Price not found for XYZ"));
    }

    #[test]
    fn status_round_trips_through_its_storage_form() {
        for status in [ExecutionStatus::Executed, ExecutionStatus::Failed] {
            assert_eq!(status.as_str().parse::<ExecutionStatus>().unwrap(), status);
        }
        assert!("pending".parse::<ExecutionStatus>().is_err());
    }
}
