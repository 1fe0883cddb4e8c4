//! Price derivation. Pure and deterministic: the same rate and period always
//! produce the same total, so a price can be recomputed at audit time.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::engine::EngineError;
use crate::model::Period;

/// `day_rate × billable days`, rounded to the currency's minor unit
/// (2 decimal places, midpoint away from zero).
pub fn total_price(day_rate: Decimal, period: &Period) -> Result<Decimal, EngineError> {
    let days = Decimal::from(period.duration_days());
    day_rate
        .checked_mul(days)
        .map(|total| total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .ok_or(EngineError::LimitExceeded("price overflow"))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::model::MS_PER_DAY;

    #[test]
    fn whole_days() {
        let p = Period::new(0, 3 * MS_PER_DAY);
        assert_eq!(total_price(dec!(1000), &p).unwrap(), dec!(3000));
    }

    #[test]
    fn partial_day_bills_full_day() {
        let p = Period::new(0, MS_PER_DAY + 1);
        assert_eq!(total_price(dec!(100), &p).unwrap(), dec!(200));
    }

    #[test]
    fn sub_day_bills_one_day() {
        let p = Period::new(0, 3_600_000);
        assert_eq!(total_price(dec!(49.99), &p).unwrap(), dec!(49.99));
    }

    #[test]
    fn minor_unit_rounding() {
        // 33.333 × 3 = 99.999 → 100.00 at 2dp
        let p = Period::new(0, 3 * MS_PER_DAY);
        assert_eq!(total_price(dec!(33.333), &p).unwrap(), dec!(100.00));
    }

    #[test]
    fn deterministic() {
        let p = Period::new(0, 7 * MS_PER_DAY);
        let a = total_price(dec!(123.45), &p).unwrap();
        let b = total_price(dec!(123.45), &p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn overflow_is_reported() {
        let p = Period::new(0, 366 * MS_PER_DAY);
        let result = total_price(Decimal::MAX, &p);
        assert!(matches!(result, Err(EngineError::LimitExceeded(_))));
    }
}
