//! Weighted-average cost basis accumulation.
//!
//! All arithmetic is checked `Decimal` so that years of monthly merges do not
//! drift and an overflow surfaces as an error instead of a panic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalculatorError, Result};

/// Quantity and average price of a position after a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBasis {
    pub quantity: Decimal,
    pub average_price: Decimal,
}

impl CostBasis {
    pub fn new(quantity: Decimal, average_price: Decimal) -> Self {
        Self {
            quantity,
            average_price,
        }
    }

    /// Folds another purchase into this basis.
    pub fn absorb(self, quantity: Decimal, price: Decimal) -> Result<Self> {
        merge(self.quantity, self.average_price, quantity, price)
    }
}

/// Merges a new purchase into an existing position.
///
/// `average_price = (existing_qty * existing_avg + new_qty * new_price) / (existing_qty + new_qty)`.
/// The merged quantity must be positive.
pub fn merge(
    existing_quantity: Decimal,
    existing_average_price: Decimal,
    new_quantity: Decimal,
    new_price: Decimal,
) -> Result<CostBasis> {
    let quantity = existing_quantity
        .checked_add(new_quantity)
        .ok_or(CalculatorError::Overflow("merged quantity"))?;
    if quantity <= Decimal::ZERO {
        return Err(CalculatorError::NonPositiveQuantity(quantity).into());
    }

    let existing_cost = existing_quantity
        .checked_mul(existing_average_price)
        .ok_or(CalculatorError::Overflow("existing cost"))?;
    let new_cost = new_quantity
        .checked_mul(new_price)
        .ok_or(CalculatorError::Overflow("purchase cost"))?;
    let total_cost = existing_cost
        .checked_add(new_cost)
        .ok_or(CalculatorError::Overflow("total cost"))?;
    let average_price = total_cost
        .checked_div(quantity)
        .ok_or(CalculatorError::Overflow("average price"))?;

    Ok(CostBasis {
        quantity,
        average_price,
    })
}
