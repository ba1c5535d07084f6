//! Database models for SIPs.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use sipledger_core::sips::{MalformedSip, NewSip, Sip, SipFrequency};

use crate::utils::{format_date, format_decimal, format_timestamp, parse_date, parse_decimal, parse_timestamp};

/// Database model for SIPs
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::sips)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SipDB {
    pub id: String,
    pub user_id: String,
    pub trading_symbol: String,
    pub scheme_name: String,
    pub amount: String,
    pub frequency: String,
    pub start_date: String,
    pub next_execution_date: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl SipDB {
    pub fn from_new(
        id: String,
        new_sip: NewSip,
        next_execution_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: new_sip.user_id,
            trading_symbol: new_sip.trading_symbol,
            scheme_name: new_sip.scheme_name,
            amount: format_decimal(new_sip.amount),
            frequency: new_sip.frequency.as_str().to_string(),
            start_date: format_date(new_sip.start_date),
            next_execution_date: format_date(next_execution_date),
            active: new_sip.active,
            created_at: format_timestamp(now),
            updated_at: format_timestamp(now),
        }
    }

    fn malformed(&self, reason: String) -> MalformedSip {
        MalformedSip {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            scheme_name: self.scheme_name.clone(),
            reason,
        }
    }
}

// A row is malformed when any typed column fails to decode.
impl TryFrom<SipDB> for Sip {
    type Error = MalformedSip;

    fn try_from(db: SipDB) -> Result<Self, Self::Error> {
        let decoded = (|| -> Result<_, String> {
            let frequency = db
                .frequency
                .parse::<SipFrequency>()
                .map_err(|e| e.to_string())?;
            Ok((
                parse_decimal(&db.amount, "amount")?,
                frequency,
                parse_date(&db.start_date, "start_date")?,
                parse_date(&db.next_execution_date, "next_execution_date")?,
                parse_timestamp(&db.created_at, "created_at")?,
                parse_timestamp(&db.updated_at, "updated_at")?,
            ))
        })();

        let (amount, frequency, start_date, next_execution_date, created_at, updated_at) =
            decoded.map_err(|reason| db.malformed(reason))?;

        Ok(Sip {
            id: db.id,
            user_id: db.user_id,
            trading_symbol: db.trading_symbol,
            scheme_name: db.scheme_name,
            amount,
            frequency,
            start_date,
            next_execution_date,
            active: db.active,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn row() -> SipDB {
        SipDB {
            id: "sip-1".to_string(),
            user_id: "user-1".to_string(),
            trading_symbol: "INF846K01DP8".to_string(),
            scheme_name: "Axis Bluechip Fund".to_string(),
            amount: "5000".to_string(),
            frequency: "monthly".to_string(),
            start_date: "2024-01-31".to_string(),
            next_execution_date: "2024-02-29".to_string(),
            active: true,
            created_at: "2024-01-31T10:00:00.000000Z".to_string(),
            updated_at: "2024-01-31T10:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn decodes_a_well_formed_row() {
        let sip = Sip::try_from(row()).unwrap();
        assert_eq!(sip.amount, dec!(5000));
        assert_eq!(sip.frequency, SipFrequency::Monthly);
        assert_eq!(
            sip.next_execution_date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            sip.created_at,
            Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn reports_the_offending_column() {
        let mut bad = row();
        bad.amount = "five thousand".to_string();
        let malformed = Sip::try_from(bad).unwrap_err();
        assert_eq!(malformed.id, "sip-1");
        assert_eq!(malformed.scheme_name, "Axis Bluechip Fund");
        assert!(malformed.reason.contains("amount"));

        let mut bad = row();
        bad.frequency = "weekly".to_string();
        let malformed = Sip::try_from(bad).unwrap_err();
        assert!(malformed.reason.contains("weekly"));
    }
}
