//! Discount pricing rules.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use supplyhub_core::{Field, ValidationError, ValueObject};

/// Whole-number discount in `0..100`; zero means "no discount".
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiscountPercent(u8);

impl ValueObject for DiscountPercent {}

impl DiscountPercent {
    pub const MAX_EXCLUSIVE: u8 = 100;

    pub const fn none() -> Self {
        Self(0)
    }

    /// An active discount. `0` and anything `>= 100` are rejected.
    pub fn new(percent: u8) -> Result<Self, ValidationError> {
        if percent == 0 || percent >= Self::MAX_EXCLUSIVE {
            return Err(ValidationError::single(
                Field::Discount,
                format!("must be between 0 and 100 (exclusive), got {percent}"),
            ));
        }
        Ok(Self(percent))
    }

    /// Validates an arbitrary numeric percent and rounds it to a whole number.
    ///
    /// The input must lie strictly inside `(0, 100)`, and so must the rounded
    /// value: `0.3` and `99.7` are rejected rather than silently becoming a
    /// no-op or a free product.
    pub fn from_decimal(percent: Decimal) -> Result<Self, ValidationError> {
        if percent <= Decimal::ZERO || percent >= Decimal::ONE_HUNDRED {
            return Err(ValidationError::single(
                Field::Discount,
                format!("must be between 0 and 100 (exclusive), got {percent}"),
            ));
        }

        let rounded = percent
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u8()
            .unwrap_or(0);
        Self::new(rounded)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_active(&self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<u8> for DiscountPercent {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == 0 { Ok(Self::none()) } else { Self::new(value) }
    }
}

impl From<DiscountPercent> for u8 {
    fn from(value: DiscountPercent) -> Self {
        value.0
    }
}

impl core::fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Price after applying `discount` to `base`.
///
/// Always computed from the undiscounted base, rounded half away from zero to
/// whole currency units. Without an active discount the base is returned
/// untouched (no rounding). `None` when the product of base and the kept share
/// does not fit in a [`Decimal`].
pub fn discounted_price(base: Decimal, discount: DiscountPercent) -> Option<Decimal> {
    if !discount.is_active() {
        return Some(base);
    }

    let keep = Decimal::ONE_HUNDRED - Decimal::from(discount.value());
    let price = base.checked_mul(keep)?.checked_div(Decimal::ONE_HUNDRED)?;
    Some(price.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// [`discounted_price`] as a validation result on the price field.
pub(crate) fn checked_discounted_price(
    base: Decimal,
    discount: DiscountPercent,
) -> Result<Decimal, ValidationError> {
    discounted_price(base, discount).ok_or_else(|| {
        ValidationError::single(
            Field::Price,
            format!("{base} is too large to apply a {discount} discount"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_percent_off_rice() {
        let price = discounted_price(Decimal::from(10400), DiscountPercent::new(20).unwrap());
        assert_eq!(price, Some(Decimal::from(8320)));
    }

    #[test]
    fn no_discount_keeps_fractional_base() {
        let base = Decimal::new(120050, 2);
        assert_eq!(discounted_price(base, DiscountPercent::none()), Some(base));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 999 * 0.5 = 499.5
        let price = discounted_price(Decimal::from(999), DiscountPercent::new(50).unwrap());
        assert_eq!(price, Some(Decimal::from(500)));

        // 1001 * 0.67 = 670.67
        let price = discounted_price(Decimal::from(1001), DiscountPercent::new(33).unwrap());
        assert_eq!(price, Some(Decimal::from(671)));
    }

    #[test]
    fn overflowing_base_has_no_discounted_price() {
        let huge = Decimal::from_scientific("1e28").unwrap();
        let half = DiscountPercent::new(50).unwrap();
        assert_eq!(discounted_price(huge, half), None);
        assert_eq!(discounted_price(Decimal::MAX, DiscountPercent::new(20).unwrap()), None);

        let err = checked_discounted_price(huge, half).unwrap_err();
        assert!(err.has_field(Field::Price));

        // Undiscounted prices are never multiplied.
        assert_eq!(discounted_price(Decimal::MAX, DiscountPercent::none()), Some(Decimal::MAX));
    }

    #[test]
    fn bounds_are_exclusive() {
        assert!(DiscountPercent::new(0).is_err());
        assert!(DiscountPercent::new(100).is_err());
        assert!(DiscountPercent::new(1).is_ok());
        assert!(DiscountPercent::new(99).is_ok());
    }

    #[test]
    fn from_decimal_rounds_and_rechecks() {
        assert_eq!(
            DiscountPercent::from_decimal(Decimal::new(125, 1)).unwrap().value(),
            13
        );
        assert!(DiscountPercent::from_decimal(Decimal::new(3, 1)).is_err());
        assert!(DiscountPercent::from_decimal(Decimal::new(997, 1)).is_err());
        assert!(DiscountPercent::from_decimal(Decimal::from(-5)).is_err());
        assert!(DiscountPercent::from_decimal(Decimal::ONE_HUNDRED).is_err());
    }

    #[test]
    fn deserialization_enforces_range() {
        let ok: DiscountPercent = serde_json::from_str("15").unwrap();
        assert_eq!(ok.value(), 15);
        let none: DiscountPercent = serde_json::from_str("0").unwrap();
        assert!(!none.is_active());
        assert!(serde_json::from_str::<DiscountPercent>("100").is_err());
    }
}
