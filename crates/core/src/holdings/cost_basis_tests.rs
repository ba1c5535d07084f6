#[cfg(test)]
mod tests {
    use crate::errors::{CalculatorError, Error};
    use crate::holdings::cost_basis::{merge, CostBasis};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn merges_into_existing_position() {
        let merged = merge(dec!(100), dec!(50), dec!(50), dec!(60)).unwrap();

        assert_eq!(merged.quantity, dec!(150));
        // (100*50 + 50*60) / 150 = 53.333...
        assert_eq!(merged.average_price.round_dp(6), dec!(53.333333));
    }

    #[test]
    fn opening_from_empty_position_takes_purchase_price() {
        let merged = merge(Decimal::ZERO, Decimal::ZERO, dec!(100), dec!(50)).unwrap();

        assert_eq!(merged, CostBasis::new(dec!(100), dec!(50)));
    }

    #[test]
    fn zero_merged_quantity_is_an_error() {
        let result = merge(Decimal::ZERO, dec!(10), Decimal::ZERO, dec!(12));

        assert!(matches!(
            result,
            Err(Error::Calculation(CalculatorError::NonPositiveQuantity(_)))
        ));
    }

    #[test]
    fn overflow_is_reported_not_panicked() {
        let result = merge(Decimal::MAX, dec!(2), dec!(1), dec!(1));

        assert!(matches!(
            result,
            Err(Error::Calculation(CalculatorError::Overflow(_)))
        ));
    }

    #[test]
    fn ten_years_of_monthly_contributions_keep_exact_totals() {
        let amount = dec!(5000);
        let mut basis = CostBasis::new(Decimal::ZERO, Decimal::ZERO);
        let mut total_units = Decimal::ZERO;
        let mut total_invested = Decimal::ZERO;

        for month in 0..120u32 {
            let nav = dec!(40) + Decimal::from(month % 17) * dec!(1.25);
            let units = amount / nav;
            basis = basis.absorb(units, nav).unwrap();
            total_units += units;
            total_invested += units * nav;
        }

        assert_eq!(basis.quantity, total_units);
        let drift = (basis.quantity * basis.average_price - total_invested).abs();
        assert!(drift / total_invested < dec!(0.000001), "drift {}", drift);
    }
}
