//! Database models for holdings.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use sipledger_core::errors::{DatabaseError, Error};
use sipledger_core::holdings::{Holding, NewHolding};

use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp};

/// Database model for holdings
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
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct HoldingDB {
    pub id: String,
    pub user_id: String,
    pub trading_symbol: String,
    pub amc: String,
    pub scheme_name: String,
    pub scheme_type: String,
    pub plan: String,
    pub quantity: String,
    pub average_price: String,
    pub purchase_date: String,
    pub origin_note: String,
    pub created_at: String,
    pub updated_at: String,
}

impl HoldingDB {
    pub fn from_new(id: String, new_holding: NewHolding, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new_holding.user_id,
            trading_symbol: new_holding.trading_symbol,
            amc: new_holding.amc,
            scheme_name: new_holding.scheme_name,
            scheme_type: new_holding.scheme_type,
            plan: new_holding.plan,
            quantity: format_decimal(new_holding.quantity),
            average_price: format_decimal(new_holding.average_price),
            purchase_date: format_timestamp(new_holding.purchase_date),
            origin_note: new_holding.origin_note,
            created_at: format_timestamp(now),
            updated_at: format_timestamp(now),
        }
    }
}

impl TryFrom<HoldingDB> for Holding {
    type Error = Error;

    fn try_from(db: HoldingDB) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| {
            Error::Database(DatabaseError::Internal(format!(
                "Holding {}: {}",
                db.id, reason
            )))
        };
        let quantity = parse_decimal(&db.quantity, "quantity").map_err(corrupt)?;
        let average_price = parse_decimal(&db.average_price, "average_price").map_err(corrupt)?;
        let purchase_date = parse_timestamp(&db.purchase_date, "purchase_date").map_err(corrupt)?;
        let created_at = parse_timestamp(&db.created_at, "created_at").map_err(corrupt)?;
        let updated_at = parse_timestamp(&db.updated_at, "updated_at").map_err(corrupt)?;

        Ok(Holding {
            id: db.id,
            user_id: db.user_id,
            trading_symbol: db.trading_symbol,
            amc: db.amc,
            scheme_name: db.scheme_name,
            scheme_type: db.scheme_type,
            plan: db.plan,
            quantity,
            average_price,
            purchase_date,
            origin_note: db.origin_note,
            created_at,
            updated_at,
        })
    }
}
