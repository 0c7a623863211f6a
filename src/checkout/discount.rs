//! Discount settlement math
//!
//! All monetary arithmetic is done in `Decimal` and converted to `f64`
//! only at the storage/serialization boundary, rounded to 2 decimal
//! places half-up.

use crate::db::models::DiscountType;
use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places)
const DECIMAL_PLACES: u32 = 2;

pub(crate) fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

pub(crate) fn to_f64(d: Decimal) -> f64 {
    d.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Result of the discount/total computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    pub discount: f64,
    pub total: f64,
}

/// Compute the authoritative discount and total for an order.
///
/// Without a coupon the client-submitted discount is clamped to
/// `[0, subtotal + tax]`. With a coupon the discount is recomputed from the
/// coupon's own type/value and the client-submitted amount is ignored, so a
/// tampered request cannot inflate the discount. In both cases
/// `total = max(0, subtotal + tax - discount)`.
pub fn settle(
    subtotal: f64,
    tax: f64,
    client_discount: f64,
    coupon: Option<(DiscountType, f64)>,
) -> Settlement {
    let gross = to_decimal(subtotal) + to_decimal(tax);
    let hundred = Decimal::ONE_HUNDRED;

    let discount = match coupon {
        Some((DiscountType::Percentage, value)) => gross * to_decimal(value) / hundred,
        Some((DiscountType::Fixed, value)) => to_decimal(value),
        None => to_decimal(client_discount).max(Decimal::ZERO),
    };
    let discount = discount.min(gross).max(Decimal::ZERO);

    let total = (gross - discount).max(Decimal::ZERO);

    Settlement {
        discount: to_f64(discount),
        total: to_f64(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_coupon_clamps_client_discount() {
        // Tampered client discount larger than the order is clamped
        let s = settle(400.0, 20.0, 1000.0, None);
        assert_eq!(s.discount, 420.0);
        assert_eq!(s.total, 0.0);

        // Negative client discount is ignored
        let s = settle(400.0, 20.0, -50.0, None);
        assert_eq!(s.discount, 0.0);
        assert_eq!(s.total, 420.0);
    }

    #[test]
    fn percentage_coupon_recomputes_from_gross() {
        // 10% of (400 + 20) = 42, regardless of the client-submitted amount
        let s = settle(400.0, 20.0, 0.0, Some((DiscountType::Percentage, 10.0)));
        assert_eq!(s.discount, 42.0);
        assert_eq!(s.total, 378.0);
    }

    #[test]
    fn fixed_coupon_capped_at_gross() {
        let s = settle(30.0, 0.0, 0.0, Some((DiscountType::Fixed, 50.0)));
        assert_eq!(s.discount, 30.0);
        assert_eq!(s.total, 0.0);

        let s = settle(100.0, 5.0, 0.0, Some((DiscountType::Fixed, 50.0)));
        assert_eq!(s.discount, 50.0);
        assert_eq!(s.total, 55.0);
    }

    #[test]
    fn rounds_half_up_to_cents() {
        // 15% of 10.03 = 1.5045 -> 1.50
        let s = settle(10.03, 0.0, 0.0, Some((DiscountType::Percentage, 15.0)));
        assert_eq!(s.discount, 1.5);
        assert_eq!(s.total, 8.53);
    }

    #[test]
    fn hundred_percent_coupon_zeroes_total() {
        let s = settle(400.0, 20.0, 0.0, Some((DiscountType::Percentage, 100.0)));
        assert_eq!(s.discount, 420.0);
        assert_eq!(s.total, 0.0);
    }
}
