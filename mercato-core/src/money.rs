//! Fixed-point money and order pricing
//!
//! Amounts are held as integer cents so that totals are exact. On the wire
//! they travel as JSON decimal numbers (`18.0`, `12.5`).

use std::fmt;

use serde::{Serialize, Serializer};

use crate::ValidationError;

/// Tax multiplier applied to order subtotals, in tenths (1.2x).
pub const TAX_MULTIPLIER_TENTHS: i64 = 12;

/// Monetary amount in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest accepted product price, 1 000 000 000.00. Orders of up to
    /// about seven million such items still total within `i64` cents.
    pub const MAX_PRICE: Money = Money(100_000_000_000);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Parse a client-supplied price, rounding to the nearest cent.
    ///
    /// Rejects NaN and infinities. Once rounded the amount must be at least
    /// one cent and at most [`Money::MAX_PRICE`].
    pub fn price(value: f64, field: &'static str) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "must be a finite number",
            });
        }
        let cents = (value * 100.0).round();
        if cents < 1.0 {
            return Err(ValidationError::NotPositive { field });
        }
        if cents > Self::MAX_PRICE.0 as f64 {
            return Err(ValidationError::TooLarge { field });
        }
        Ok(Self(cents as i64))
    }

    /// Amount as a decimal number of currency units.
    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Apply the tax multiplier, rounding half up to the cent.
    ///
    /// `None` when the taxed amount does not fit in `i64` cents.
    pub fn checked_with_tax(self) -> Option<Money> {
        self.0
            .checked_mul(TAX_MULTIPLIER_TENTHS)?
            .checked_add(5)
            .map(|tenths| Money(tenths.div_euclid(10)))
    }
}

/// Tax-inclusive total for a set of product prices.
///
/// Fails with [`ValidationError::TooLarge`] instead of wrapping when the sum
/// or the taxed sum overflows.
pub fn order_total<I>(prices: I) -> Result<Money, ValidationError>
where
    I: IntoIterator<Item = Money>,
{
    prices
        .into_iter()
        .try_fold(Money::ZERO, Money::checked_add)
        .and_then(Money::checked_with_tax)
        .ok_or(ValidationError::TooLarge { field: "total" })
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_applies_tax() {
        let total = order_total([Money::from_cents(1000), Money::from_cents(500)]).unwrap();
        assert_eq!(total, Money::from_cents(1800));
        assert_eq!(total.to_string(), "18.00");
    }

    #[test]
    fn total_rounds_half_up() {
        // 0.04 * 1.2 = 0.048 -> 0.05
        assert_eq!(order_total([Money::from_cents(4)]).unwrap().cents(), 5);
        // 0.01 * 1.2 = 0.012 -> 0.01
        assert_eq!(order_total([Money::from_cents(1)]).unwrap().cents(), 1);
        // 19.99 * 1.2 = 23.988 -> 23.99
        assert_eq!(order_total([Money::from_cents(1999)]).unwrap().cents(), 2399);
    }

    #[test]
    fn total_at_max_price() {
        let total = order_total([Money::MAX_PRICE, Money::MAX_PRICE]).unwrap();
        assert_eq!(total.cents(), 240_000_000_000);
        assert!(total.as_decimal() > 0.0);
    }

    #[test]
    fn total_overflow_is_an_error() {
        // taxing overflows even though the sum fits
        let err = order_total([Money::from_cents(i64::MAX / 10)]).unwrap_err();
        assert_eq!(err, ValidationError::TooLarge { field: "total" });

        // the sum itself overflows
        let err = order_total([Money::from_cents(i64::MAX), Money::from_cents(1)]).unwrap_err();
        assert_eq!(err, ValidationError::TooLarge { field: "total" });
    }

    #[test]
    fn empty_total_is_zero() {
        assert_eq!(order_total(Vec::new()).unwrap(), Money::ZERO);
    }

    #[test]
    fn price_parsing() {
        assert_eq!(Money::price(10.0, "price").unwrap().cents(), 1000);
        assert_eq!(Money::price(19.999, "price").unwrap().cents(), 2000);
        assert_eq!(Money::price(0.1, "price").unwrap().cents(), 10);
    }

    #[test]
    fn price_rejects_non_positive() {
        assert!(matches!(
            Money::price(0.0, "price"),
            Err(ValidationError::NotPositive { .. })
        ));
        assert!(matches!(
            Money::price(-3.5, "price"),
            Err(ValidationError::NotPositive { .. })
        ));
        assert!(matches!(
            Money::price(0.004, "price"),
            Err(ValidationError::NotPositive { .. })
        ));
        assert!(matches!(
            Money::price(f64::NAN, "price"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn price_is_capped() {
        assert_eq!(Money::price(1e9, "price").unwrap(), Money::MAX_PRICE);
        assert_eq!(
            Money::price(1_000_000_000.01, "price"),
            Err(ValidationError::TooLarge { field: "price" })
        );
        assert_eq!(
            Money::price(1e16, "price"),
            Err(ValidationError::TooLarge { field: "price" })
        );
    }

    #[test]
    fn serializes_as_decimal() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "12.5");
        let json = serde_json::to_string(&Money::MAX_PRICE).unwrap();
        assert_eq!(json, "1000000000.0");
    }
}
