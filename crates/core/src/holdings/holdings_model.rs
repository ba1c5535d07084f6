//! Holding domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A user's aggregate position in one trading symbol.
///
/// There is at most one holding per (user, symbol); purchases of the same
/// symbol merge into it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub user_id: String,
    pub trading_symbol: String,
    pub amc: String,
    pub scheme_name: String,
    pub scheme_type: String,
    pub plan: String,
    /// Units held
    pub quantity: Decimal,
    /// Weighted-average NAV paid per unit
    pub average_price: Decimal,
    pub purchase_date: DateTime<Utc>,
    /// Free-text note describing where the holding came from
    pub origin_note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Holding {
    /// Total amount invested at cost.
    pub fn cost_value(&self) -> Decimal {
        self.quantity * self.average_price
    }
}

/// Input model for opening a new holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub trading_symbol: String,
    pub amc: String,
    pub scheme_name: String,
    pub scheme_type: String,
    pub plan: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub purchase_date: DateTime<Utc>,
    pub origin_note: String,
}

impl NewHolding {
    /// Validates the new holding data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.trading_symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "tradingSymbol".to_string(),
            )));
        }
        if self.quantity.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Holding quantity cannot be negative: {}",
                self.quantity
            ))));
        }
        Ok(())
    }
}
