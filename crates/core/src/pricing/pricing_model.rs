//! Pricing domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest NAV for a mutual fund scheme, with the fund metadata needed to
/// open a new holding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub trading_symbol: String,
    pub price: Decimal,
    /// Fund house issuing the scheme
    pub amc: String,
    pub scheme_type: String,
    pub plan: String,
    pub as_of: NaiveDate,
}
