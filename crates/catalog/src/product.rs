use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyhub_core::{Entity, ProductId, ValidationError};

use crate::input::ProductDraft;
use crate::pricing::{DiscountPercent, checked_discounted_price};

/// A product in a supplier's catalog.
///
/// `base_price` is the undiscounted reference price. Discounts never overwrite
/// it; only an explicit edit does. `current_price` is always derived from
/// `base_price` and `discount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    base_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    current_price: Decimal,
    quantity: u64,
    unit: String,
    discount: DiscountPercent,
}

impl Product {
    pub(crate) fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            base_price: draft.price,
            current_price: draft.price,
            quantity: draft.quantity,
            unit: draft.unit,
            discount: DiscountPercent::none(),
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    pub fn current_price(&self) -> Decimal {
        self.current_price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }

    pub fn is_discounted(&self) -> bool {
        self.discount.is_active()
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Fails without touching the product when the discounted price cannot be
    /// represented.
    pub(crate) fn set_discount(&mut self, discount: DiscountPercent) -> Result<(), ValidationError> {
        self.current_price = checked_discounted_price(self.base_price, discount)?;
        self.discount = discount;
        Ok(())
    }

    /// Add a signed delta to the stock, clamping at zero.
    pub(crate) fn adjust_stock(&mut self, delta: i64) {
        self.quantity = if delta >= 0 {
            self.quantity.saturating_add(delta.unsigned_abs())
        } else {
            self.quantity.saturating_sub(delta.unsigned_abs())
        };
    }

    /// Replace every editable field. The active discount, if any, is kept and
    /// re-applied to the new base price; if that fails nothing is replaced.
    pub(crate) fn replace(&mut self, draft: ProductDraft) -> Result<(), ValidationError> {
        self.current_price = checked_discounted_price(draft.price, self.discount)?;
        self.name = draft.name;
        self.base_price = draft.price;
        self.quantity = draft.quantity;
        self.unit = draft.unit;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> Product {
        let draft = ProductDraft::parse("Rice 25kg", "10400", "30", "bag").unwrap();
        Product::from_draft(ProductId::new(), draft)
    }

    #[test]
    fn new_product_is_undiscounted() {
        let p = rice();
        assert_eq!(p.base_price(), p.current_price());
        assert!(!p.is_discounted());
        assert!(p.in_stock());
    }

    #[test]
    fn stock_adjustment_saturates_both_ways() {
        let mut p = rice();
        p.adjust_stock(-31);
        assert_eq!(p.quantity(), 0);
        p.adjust_stock(i64::MIN);
        assert_eq!(p.quantity(), 0);

        p.adjust_stock(i64::MAX);
        p.adjust_stock(i64::MAX);
        p.adjust_stock(i64::MAX);
        assert_eq!(p.quantity(), u64::MAX);
    }

    #[test]
    fn serializes_prices_as_numbers() {
        let mut p = rice();
        p.set_discount(DiscountPercent::new(20).unwrap()).unwrap();

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["base_price"], serde_json::json!(10400.0));
        assert_eq!(json["current_price"], serde_json::json!(8320.0));
        assert_eq!(json["discount"], serde_json::json!(20));
    }

    #[test]
    fn failed_reprice_keeps_every_field() {
        let draft = ProductDraft::parse("Gold", "1e28", "1", "kg").unwrap();
        let mut p = Product::from_draft(ProductId::new(), draft);
        let before = p.clone();

        assert!(p.set_discount(DiscountPercent::new(50).unwrap()).is_err());
        assert_eq!(p, before);

        let mut discounted = rice();
        discounted.set_discount(DiscountPercent::new(20).unwrap()).unwrap();
        let before = discounted.clone();
        let huge = ProductDraft::parse("Rice 50kg", "79228162514264337593543950335", "5", "bag").unwrap();
        assert!(discounted.replace(huge).is_err());
        assert_eq!(discounted, before);
    }
}
