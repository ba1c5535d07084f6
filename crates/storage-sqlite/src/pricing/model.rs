//! Database model for the mutual fund price table.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use sipledger_core::errors::{DatabaseError, Error};
use sipledger_core::pricing::PriceQuote;

use crate::utils::{parse_date, parse_decimal};

/// One row per scheme holding its latest published NAV.
///
/// The table is filled by an external feed; this crate only reads it.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::mutual_fund_prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MutualFundPriceDB {
    pub trading_symbol: String,
    pub name: String,
    pub amc: String,
    pub scheme_type: String,
    pub plan: String,
    pub minimum_purchase_amount: Option<String>,
    pub last_price: String,
    pub last_price_date: String,
}

impl TryFrom<MutualFundPriceDB> for PriceQuote {
    type Error = Error;

    fn try_from(db: MutualFundPriceDB) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| {
            Error::Database(DatabaseError::Internal(format!(
                "Price for {}: {}",
                db.trading_symbol, reason
            )))
        };
        let price = parse_decimal(&db.last_price, "last_price").map_err(corrupt)?;
        let as_of = parse_date(&db.last_price_date, "last_price_date").map_err(corrupt)?;

        Ok(PriceQuote {
            trading_symbol: db.trading_symbol,
            price,
            amc: db.amc,
            scheme_type: db.scheme_type,
            plan: db.plan,
            as_of,
        })
    }
}
